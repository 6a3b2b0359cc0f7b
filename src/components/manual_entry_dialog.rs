//! Manual Entry Dialog Component
//!
//! Name / category / quantity form. Field state lives with the caller so a
//! cancelled entry is still there when the dialog reopens.

use leptos::prelude::*;
use smartcart_core::{Category, ManualEntryForm, NewItem};

use crate::components::CategorySelector;

#[component]
pub fn ManualEntryDialog(
    form: RwSignal<ManualEntryForm>,
    /// Unit attached to every submitted item
    #[prop(into)] unit: String,
    #[prop(into)] on_submit: Callback<NewItem>,
    #[prop(into)] on_cancel: Callback<()>,
) -> impl IntoView {
    let name_input = NodeRef::<leptos::html::Input>::new();
    Effect::new(move |_| {
        if let Some(input) = name_input.get() {
            let _ = input.focus();
        }
    });

    let submit = move |ev: web_sys::SubmitEvent| {
        ev.prevent_default();
        let mut emitted = None;
        form.update(|f| emitted = f.submit(&unit));
        // Blank name: nothing emitted, dialog stays open
        if let Some(item) = emitted {
            on_submit.run(item);
        }
    };

    view! {
        <div class="dialog-backdrop" on:click=move |_| on_cancel.run(())>
            <div class="dialog" on:click=|ev| ev.stop_propagation()>
                <h2 class="dialog-title">"+ Add Item"</h2>
                <form class="manual-entry-form" on:submit=submit>
                    <label class="field">
                        <span class="field-label">"Item Name"</span>
                        <input
                            type="text"
                            placeholder="e.g., Fresh Tomatoes"
                            node_ref=name_input
                            prop:value=move || form.with(|f| f.name.clone())
                            on:input=move |ev| form.update(|f| f.set_name(event_target_value(&ev)))
                        />
                    </label>

                    <label class="field">
                        <span class="field-label">"Category"</span>
                        <CategorySelector
                            value=Signal::derive(move || form.with(|f| f.category))
                            on_change=move |category: Category| form.update(|f| f.set_category(category))
                        />
                    </label>

                    <label class="field">
                        <span class="field-label">"Quantity"</span>
                        <input
                            type="number"
                            min="1"
                            prop:value=move || form.with(|f| f.quantity.to_string())
                            on:input=move |ev| form.update(|f| f.set_quantity_input(&event_target_value(&ev)))
                        />
                    </label>

                    <div class="dialog-actions">
                        <button type="button" class="outline-btn" on:click=move |_| on_cancel.run(())>"Cancel"</button>
                        <button type="submit" class="primary-btn">"Add Item"</button>
                    </div>
                </form>
            </div>
        </div>
    }
}
