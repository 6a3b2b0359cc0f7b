//! Category Selector Component
//!
//! Dropdown over the fixed category list. Only these values can be emitted.

use leptos::prelude::*;
use smartcart_core::Category;

#[component]
pub fn CategorySelector(
    #[prop(into)] value: Signal<Category>,
    #[prop(into)] on_change: Callback<Category>,
) -> impl IntoView {
    view! {
        <select
            class="category-select"
            prop:value=move || value.get().as_str()
            on:change=move |ev| {
                if let Some(category) = Category::parse(&event_target_value(&ev)) {
                    on_change.run(category);
                }
            }
        >
            {Category::ALL.iter().map(|category| {
                view! {
                    <option value=category.as_str()>
                        {category.emoji()} " " {category.label()}
                    </option>
                }
            }).collect_view()}
        </select>
    }
}
