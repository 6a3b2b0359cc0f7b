//! SmartCart Frontend App
//!
//! Scan page: add-item affordances, totals, and the most recent items.

use leptos::prelude::*;
use reactive_stores::Store;
use smartcart_core::{ItemList, NewItem};

use crate::client_store::ClientStore;
use crate::components::{ErrorBanner, ItemCardView, ScannerInterface, StatsCard};
use crate::config::load_config;
use crate::context::AppContext;
use crate::store::{PageState, PageStateStoreFields};

#[component]
pub fn App() -> impl IntoView {
    let config = load_config();
    let sort = config.sort_spec().unwrap_or_default();
    log::info!("starting with sort {} and {} recent items", sort, config.recent_count);

    let list = ItemList::new(ClientStore::from_config(&config), sort, config.recent_count);
    let page = Store::new(PageState::default());

    // Provide context to all children
    provide_context(page);
    let ctx = AppContext::new(config, list, page);
    provide_context(ctx);

    // Load items on mount
    Effect::new(move |_| {
        ctx.reload();
    });

    let total = Signal::derive(move || page.total().get());

    view! {
        <div class="scan-page">
            <header class="page-header">
                <div class="header-icon">"🛒"</div>
                <div>
                    <h1>"SmartCart"</h1>
                    <p class="subtitle">"Scan items to get started"</p>
                </div>
            </header>

            <ErrorBanner />

            <ScannerInterface on_add_item=move |item: NewItem| ctx.add_item(item) />

            <Show when=move || { total.get() > 0 }>
                <StatsCard total=total />
            </Show>

            <Show when=move || !page.recent().read().is_empty()>
                <section class="recent-items">
                    <h2>"Recently Added"</h2>
                    <div class="card-list">
                        <For
                            each=move || page.recent().get()
                            // Name and quantity in the key so an edited item remounts
                            key=|item| (item.id.clone(), item.name.clone(), item.quantity)
                            children=move |item| view! { <ItemCardView item=item /> }
                        />
                    </div>
                </section>
            </Show>

            <Show when=move || { total.get() == 0 }>
                <div class="empty-state">
                    <div class="empty-icon">"🛒"</div>
                    <h3>"No items yet"</h3>
                    <p>"Start scanning or adding items to discover delicious recipes"</p>
                </div>
            </Show>
        </div>
    }
}
