mod markdown_vm;
mod practice_vm;

pub use markdown_vm::{markdown_to_html, sanitize_html};
pub use practice_vm::{
    AdvanceVm, PracticeIntent, PracticeVm, StartVm, WordVm, map_practice_vm,
};
