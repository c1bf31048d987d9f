use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use leptos::prelude::*;
use leptos::task::spawn_local;

use crate::config::ViewerConfig;
use crate::console;
use crate::fetch;
use crate::highlight::Fragment;
use crate::render::{ItemKind, RenderedItem, RenderedLine, METADATA_TITLE};
use crate::view_state::{deliver, BodyState, Delivery, LoadStatus, ViewState};

const EMPHASIS_STYLE: &str = "background-color: yellow; font-weight: bold;";

#[component]
fn Highlighted(fragments: Vec<Fragment>) -> impl IntoView {
    fragments
        .into_iter()
        .map(|fragment| {
            let text = fragment.text().to_string();
            if matches!(fragment, Fragment::Emphasized(_)) {
                view! { <span style=EMPHASIS_STYLE>{text}</span> }.into_any()
            } else {
                text.into_any()
            }
        })
        .collect::<Vec<_>>()
}

#[component]
fn LabeledLine(line: RenderedLine) -> impl IntoView {
    let label = line.label.unwrap_or_default();
    view! {
        <p data-key=line.key>
            <strong>{label}":"</strong>" "
            <Highlighted fragments=line.fragments/>
        </p>
    }
}

#[component]
fn NodeItem(item: RenderedItem) -> impl IntoView {
    let title = match item.kind {
        ItemKind::Metadata => Some(view! { <h5 class="text-primary">{METADATA_TITLE}</h5> }),
        ItemKind::Block => None,
    };
    let lines = item
        .lines
        .into_iter()
        .map(|line| view! { <LabeledLine line=line/> })
        .collect::<Vec<_>>();
    let children = (!item.children.is_empty()).then(|| {
        let texts = item
            .children
            .into_iter()
            .map(|child| {
                view! {
                    <p class="mb-2" data-key=child.key>
                        <Highlighted fragments=child.fragments/>
                    </p>
                }
            })
            .collect::<Vec<_>>();
        view! { <div class="mt-3">{texts}</div> }
    });

    view! {
        <div class="mb-4" data-key=item.key>
            {title}
            <div>
                {lines}
                {children}
            </div>
        </div>
    }
}

#[component]
fn LoadingIndicator() -> impl IntoView {
    view! {
        <div class="d-flex justify-content-center align-items-center">
            <div class="spinner-border text-primary" role="status">
                <span class="visually-hidden">"Cargando..."</span>
            </div>
        </div>
    }
}

#[component]
pub fn App(#[prop(optional)] config: Option<ViewerConfig>) -> impl IntoView {
    let config = config.unwrap_or_default();
    let state = RwSignal::new(ViewState::new(&config));

    // Cleared on teardown so a late response is dropped instead of touching disposed state.
    let alive = Arc::new(AtomicBool::new(true));
    on_cleanup({
        let alive = alive.clone();
        move || alive.store(false, Ordering::Relaxed)
    });

    let data_url = config.data_url.clone();
    Effect::new(move |_| {
        let url = data_url.clone();
        let alive = alive.clone();
        spawn_local(async move {
            let result = fetch::fetch_document(&url).await;
            if let Err(err) = &result {
                console::error(&format!("Error fetching data: {err}"));
            }
            match state.try_update(move |s| deliver(&alive, s, result)) {
                Some(Delivery::Applied) => {}
                Some(Delivery::Duplicate) => return,
                Some(Delivery::Stale) | None => {
                    console::warn("document arrived after the view was closed; ignoring it");
                    return;
                }
            }
            let loaded = state.with_untracked(|s| {
                matches!(s.status(), LoadStatus::Loaded).then(|| s.nodes().len())
            });
            if let Some(count) = loaded {
                console::log(&format!("loaded {count} nodes from {url}"));
            }
        });
    });

    let on_search = move |ev| {
        let term = event_target_value(&ev);
        state.update(|s| s.set_search_term(term));
    };

    let body = move || {
        let spinner = state
            .with(ViewState::shows_loading_indicator)
            .then(|| view! { <LoadingIndicator/> });
        let content = match state.with(ViewState::body_state) {
            BodyState::Loading => ().into_any(),
            BodyState::Failed(reason) => view! {
                <p class="text-danger text-center mt-3" title=reason>
                    "No se pudo cargar el documento."
                </p>
            }
            .into_any(),
            BodyState::EmptyDocument => view! {
                <p class="text-muted text-center">"El documento no contiene nodos."</p>
            }
            .into_any(),
            BodyState::NoMatches => view! {
                <p class="text-muted text-center">"Sin resultados."</p>
            }
            .into_any(),
            BodyState::Page => state
                .with(ViewState::rendered_page)
                .into_iter()
                .map(|item| view! { <NodeItem item=item/> })
                .collect::<Vec<_>>()
                .into_any(),
        };
        view! { {spinner} {content} }
    };

    view! {
        <div class="container-fluid px-3 mt-4" style="min-height: 100vh; display: flex; flex-direction: column;">
            <div class="card shadow-lg border-0" style="flex: 1 0 auto;">
                <div class="card-header bg-primary text-white d-flex justify-content-between align-items-center">
                    <h1 class="h4 mb-0 text-center" style="font-size: 18px;">
                        "Avance Jurídico SAS - Prueba Técnica"
                    </h1>
                    <input
                        type="text"
                        placeholder="Buscar..."
                        class="form-control"
                        style="width: 300px;"
                        prop:value=move || state.with(|s| s.search_term().to_string())
                        on:input=on_search
                    />
                </div>
                <div class="card-body" style="font-size: 14px; overflow-y: auto; max-height: calc(100vh - 200px); padding: 20px;">
                    {body}
                </div>
                <div class="card-footer d-flex justify-content-between" style="background-color: #f8f9fa; padding: 10px 20px;">
                    <button
                        class="btn btn-outline-primary"
                        disabled=move || state.with(|s| !s.can_go_previous())
                        on:click=move |_| state.update(ViewState::previous_page)
                    >
                        "Anterior"
                    </button>
                    <span
                        class="text-muted"
                        style="font-size: 14px;"
                        data-page=move || state.with(ViewState::current_page).to_string()
                    >
                        {move || state.with(ViewState::page_label)}
                    </span>
                    <button
                        class="btn btn-outline-primary"
                        disabled=move || state.with(|s| !s.can_go_next())
                        on:click=move |_| state.update(ViewState::next_page)
                    >
                        "Siguiente"
                    </button>
                </div>
            </div>
        </div>
    }
}
