//! Item Card Component
//!
//! One grocery item with inline rename/requantify and delete.

use leptos::prelude::*;
use smartcart_core::{Item, ItemCard};

use crate::context::AppContext;

#[component]
pub fn ItemCardView(item: Item) -> impl IntoView {
    let ctx = use_context::<AppContext>().expect("AppContext should be provided");

    let card = RwSignal::new(ItemCard::new(&item));
    // Separate memo so typing in the buffer doesn't remount the inputs
    let editing = Memo::new(move |_| card.with(|c| c.is_editing()));

    // Set each time the edit row mounts
    let name_input = NodeRef::<leptos::html::Input>::new();
    Effect::new(move |_| {
        if let Some(input) = name_input.get() {
            let _ = input.focus();
        }
    });

    let category = item.display_category();
    let card_class = format!("item-card {}", category.css_class());
    let name = item.name.clone();
    let quantity_label = item.quantity_label();

    let save = move |_| {
        let mut intent = None;
        card.update(|c| intent = c.save());
        if let Some(intent) = intent {
            ctx.apply_intent(intent);
        }
    };

    let delete = move |_| {
        if let Some(intent) = card.with_untracked(|c| c.delete()) {
            ctx.apply_intent(intent);
        }
    };

    view! {
        <div class=card_class>
            <Show
                when=move || editing.get()
                fallback=move || view! {
                    <div class="card-row">
                        <div class="card-main">
                            <div class="card-emoji">{category.emoji()}</div>
                            <div class="card-text">
                                <h3 class="card-name">{name.clone()}</h3>
                                <p class="card-qty">{quantity_label.clone()}</p>
                            </div>
                        </div>
                        <div class="card-actions">
                            <button class="icon-btn edit-btn" on:click=move |_| card.update(|c| c.begin_edit())>"✎"</button>
                            <button class="icon-btn delete-btn" on:click=delete>"🗑"</button>
                        </div>
                    </div>
                }
            >
                <div class="card-edit">
                    <input
                        type="text"
                        class="card-name-input"
                        node_ref=name_input
                        prop:value=move || card.with(|c| c.buffer().map(|b| b.name.clone()).unwrap_or_default())
                        on:input=move |ev| card.update(|c| c.set_name(event_target_value(&ev)))
                    />
                    <div class="card-edit-row">
                        <input
                            type="number"
                            min="1"
                            class="card-qty-input"
                            prop:value=move || card.with(|c| c.buffer().map(|b| b.quantity.to_string()).unwrap_or_default())
                            on:input=move |ev| card.update(|c| c.set_quantity_input(&event_target_value(&ev)))
                        />
                        <button class="icon-btn save-btn" on:click=save>"✓"</button>
                        <button class="icon-btn cancel-btn" on:click=move |_| card.update(|c| c.cancel())>"✗"</button>
                    </div>
                </div>
            </Show>
        </div>
    }
}
