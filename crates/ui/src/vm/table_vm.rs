use quiz_core::model::QueryResult;

/// Query result flattened to display strings.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct TableVm {
    pub columns: Vec<String>,
    pub rows: Vec<Vec<String>>,
}

impl From<&QueryResult> for TableVm {
    fn from(result: &QueryResult) -> Self {
        Self {
            columns: result.columns.clone(),
            rows: result
                .rows
                .iter()
                .map(|row| row.iter().map(ToString::to_string).collect())
                .collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use quiz_core::model::Cell;

    #[test]
    fn cells_become_display_strings() {
        let result = QueryResult::new(
            vec!["ad".into(), "yas".into()],
            vec![
                vec![Cell::Text("Ali".into()), Cell::Integer(21)],
                vec![Cell::Text("Ayse".into()), Cell::Null],
            ],
        );
        let vm = TableVm::from(&result);
        assert_eq!(vm.columns, vec!["ad", "yas"]);
        assert_eq!(vm.rows[0], vec!["Ali", "21"]);
        assert_eq!(vm.rows[1], vec!["Ayse", "NULL"]);
    }
}
