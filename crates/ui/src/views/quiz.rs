use dioxus::prelude::*;

use crate::views::shared::{NavLinks, ResultTable};
use crate::vm::QuizPageVm;

#[derive(Props, Clone, PartialEq)]
pub struct QuizPageProps {
    pub vm: QuizPageVm,
}

#[component]
pub fn QuizPage(props: QuizPageProps) -> Element {
    let vm = props.vm;

    rsx! {
        NavLinks {}
        h2 { "Task {vm.position}/{vm.total}: {vm.prompt}" }
        p { class: "score", "Score: {vm.score}" }

        form { method: "post", action: "/",
            textarea { id: "query", name: "query", rows: "6", cols: "80", "{vm.submitted}" }
            br {}
            br {}
            input { r#type: "submit", value: "Run query" }
        }

        match vm.feedback.as_deref() {
            Some(text) => rsx! {
                p { class: "feedback", "{text}" }
            },
            None => rsx! {},
        }

        match vm.table.clone() {
            Some(table) => rsx! {
                h3 { "Results:" }
                ResultTable { table }
            },
            None => rsx! {},
        }

        match vm.error.as_deref() {
            Some(text) => rsx! {
                p { class: "error", "{text}" }
            },
            None => rsx! {},
        }
    }
}
