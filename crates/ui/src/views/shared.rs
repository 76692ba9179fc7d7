use dioxus::prelude::*;

use crate::vm::TableVm;

#[derive(Props, Clone, PartialEq)]
pub struct ResultTableProps {
    pub table: TableVm,
}

#[component]
pub fn ResultTable(props: ResultTableProps) -> Element {
    let table = props.table;

    rsx! {
        table { class: "result",
            tr {
                for column in table.columns.iter() {
                    th { "{column}" }
                }
            }
            for row in table.rows.iter() {
                tr {
                    for cell in row.iter() {
                        td { "{cell}" }
                    }
                }
            }
        }
    }
}

#[component]
pub fn NavLinks() -> Element {
    rsx! {
        nav {
            a { href: "/", "Quiz" }
            " | "
            a { href: "/table", "Table" }
            " | "
            a { href: "/completed", "Completed tasks" }
        }
    }
}
