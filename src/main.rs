mod app;
mod config;
mod console;
mod document;
mod fetch;
mod highlight;
mod pagination;
mod render;
mod search;
mod view_state;

use app::App;
use leptos::prelude::*;

fn main() {
    console_error_panic_hook::set_once();
    leptos::mount::mount_to_body(|| view! { <App/> });
}
