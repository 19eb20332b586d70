use std::collections::HashMap;

use tracing::debug;

use crate::{
    executor::{
        engine::Engine,
        result::{JoinRow, Outcome},
        scan::ScanIterator,
        sequential_scan::SequentialScanner,
    },
    types::{error::DatabaseError, row::Row},
};

impl Engine {
    /// Equi-join `left.left_column = right.right_column` as a hash join:
    /// build over the right table, then look up each left row. A left row
    /// matching several right rows yields one pair per match.
    pub(crate) fn join(
        &mut self,
        left_table: &str,
        right_table: &str,
        left_column: &str,
        right_column: &str,
    ) -> Result<Outcome, DatabaseError> {
        let (left_schema, left_heap) = self.table_context(left_table)?;
        let (right_schema, right_heap) = self.table_context(right_table)?;
        let left_index = left_schema.require_column(left_column)?;
        let right_index = right_schema.require_column(right_column)?;

        // Build
        let mut build: HashMap<String, Vec<String>> = HashMap::new();
        for scanned in ScanIterator::new(SequentialScanner::new(right_heap, None)) {
            let scanned = scanned?;
            let row = Row::decode(&right_schema, &scanned.bytes)?;
            if let Some(value) = row.get_value(right_index) {
                build
                    .entry(value.to_key())
                    .or_default()
                    .push(row.render(&right_schema));
            }
        }

        // Probe
        let mut rows = Vec::new();
        for scanned in ScanIterator::new(SequentialScanner::new(left_heap, None)) {
            let scanned = scanned?;
            let row = Row::decode(&left_schema, &scanned.bytes)?;
            let Some(matches) = row
                .get_value(left_index)
                .and_then(|value| build.get(&value.to_key()))
            else {
                continue;
            };
            let left = row.render(&left_schema);
            rows.extend(matches.iter().map(|right| JoinRow {
                left: left.clone(),
                right: right.clone(),
            }));
        }

        debug!(left_table, right_table, keys = build.len(), pairs = rows.len(), "join finished");
        Ok(Outcome::Joined { rows })
    }
}
