//! Stats Card Component

use leptos::prelude::*;

/// Total item count banner
#[component]
pub fn StatsCard(#[prop(into)] total: Signal<usize>) -> impl IntoView {
    view! {
        <div class="stats-card">
            <div class="stats-row">
                <div>
                    <p class="stats-label">"Total Items"</p>
                    <p class="stats-value">{move || total.get()}</p>
                </div>
                <div class="stats-icon">"✨"</div>
            </div>
            <p class="stats-footer">"Ready to generate amazing recipes!"</p>
        </div>
    }
}
