use dioxus::prelude::*;

use crate::views::shared::{NavLinks, ResultTable};
use crate::vm::TableVm;

#[derive(Props, Clone, PartialEq)]
pub struct TablePageProps {
    pub table: TableVm,
}

#[component]
pub fn TablePage(props: TablePageProps) -> Element {
    let row_count = props.table.rows.len();

    rsx! {
        NavLinks {}
        h2 { "Table: ogrenciler" }
        p { "{row_count} rows" }
        ResultTable { table: props.table.clone() }
    }
}
