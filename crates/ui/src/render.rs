//! Server-side rendering of the quiz pages to complete HTML documents.

use dioxus::prelude::*;

use crate::views::{
    CompletedPage, CompletedPageProps, QuizPage, QuizPageProps, TablePage, TablePageProps,
};
use crate::vm::{CompletedVm, QuizPageVm, TableVm};

pub const PAGE_TITLE: &str = "SQL Practice";

const STYLE: &str = "table.result { border-collapse: collapse; } \
table.result th, table.result td { border: 1px solid #444; padding: 2px 6px; } \
p.feedback { color: green; } \
p.error { color: red; }";

fn render_document<P: Clone + 'static>(root: fn(P) -> Element, props: P) -> String {
    let mut dom = VirtualDom::new_with_props(root, props);
    dom.rebuild_in_place();
    let body = dioxus_ssr::render(&dom);
    format!(
        "<!doctype html>\n<html><head><meta charset=\"utf-8\"><title>{PAGE_TITLE}</title>\
         <style>{STYLE}</style></head><body>{body}</body></html>"
    )
}

#[must_use]
pub fn render_quiz_page(vm: QuizPageVm) -> String {
    render_document(QuizPage, QuizPageProps { vm })
}

#[must_use]
pub fn render_table_page(table: TableVm) -> String {
    render_document(TablePage, TablePageProps { table })
}

#[must_use]
pub fn render_completed_page(vm: CompletedVm) -> String {
    render_document(CompletedPage, CompletedPageProps { vm })
}
