//! Output formatting for seed results.

use super::execute::{SeedResult, StoreState};
use crate::db::schema::RelationState;
use crate::output::Outputable;

impl Outputable for SeedResult {
    fn to_table(&self) -> String {
        let mut output = String::new();

        output.push_str("Database Initialization\n\n");
        output.push_str("Schema:\n");

        for relation in &self.relations {
            let status_text = match relation.status {
                RelationState::Created => "created",
                RelationState::AlreadyExists => "exists",
            };
            output.push_str(&format!("  ✓ {} ({})\n", relation.name, status_text));
        }

        output.push_str("\nInserted:\n");
        let rows = [
            ("student", self.inserted.students),
            ("teacher", self.inserted.teachers),
            ("course", self.inserted.courses),
            ("score", self.inserted.scores),
        ];
        for (name, count) in rows {
            output.push_str(&format!("  {}: {}\n", name, count));
        }

        match self.state {
            StoreState::Seeded => output.push_str("\nDatabase seeded.\n"),
            StoreState::Uninitialized => output.push_str("\nNo rows stored.\n"),
        }

        output
    }
}
