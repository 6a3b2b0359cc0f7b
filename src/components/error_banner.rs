//! Error Banner Component
//!
//! Shows the last failed store call with retry and dismiss actions. Hides
//! itself after `error_banner_ms` unless that is 0.

use gloo_timers::callback::Timeout;
use leptos::prelude::*;

use crate::context::AppContext;
use crate::store::{use_page_store, PageStateStoreFields};

#[component]
pub fn ErrorBanner() -> impl IntoView {
    let ctx = use_context::<AppContext>().expect("AppContext should be provided");
    let page = use_page_store();
    let message = Memo::new(move |_| page.last_error().get());
    // Changes on every failure, including a repeat of the same message
    let shown = Memo::new(move |_| {
        let seq = page.error_seq().get();
        page.last_error().with(|e| e.is_some()).then_some(seq)
    });

    Effect::new(move |_| {
        let Some(seq) = shown.get() else { return };
        let delay = ctx.config.with_value(|c| c.error_banner_ms);
        if delay == 0 {
            return;
        }
        // Only clears this failure; a newer one gets its own timer
        Timeout::new(delay, move || ctx.dismiss_error(Some(seq))).forget();
    });

    view! {
        <Show when=move || message.with(|m| m.is_some())>
            <div class="error-banner" role="alert">
                <span class="error-text">"⚠ " {move || message.get().unwrap_or_default()}</span>
                <button class="retry-btn" on:click=move |_| ctx.reload()>"Retry"</button>
                <button class="dismiss-btn" on:click=move |_| ctx.dismiss_error(None)>"×"</button>
            </div>
        </Show>
    }
}
