use dioxus::prelude::*;

use crate::views::shared::NavLinks;
use crate::vm::CompletedVm;

#[derive(Props, Clone, PartialEq)]
pub struct CompletedPageProps {
    pub vm: CompletedVm,
}

#[component]
pub fn CompletedPage(props: CompletedPageProps) -> Element {
    let vm = props.vm;
    let done = vm.items.len();

    rsx! {
        NavLinks {}
        h2 { "Completed tasks ({done}/{vm.total})" }
        if vm.items.is_empty() {
            p { "No tasks completed yet." }
        } else {
            ul {
                for item in vm.items.iter() {
                    li { "{item}" }
                }
            }
        }
    }
}
