//! Camera Dialog Component
//!
//! Live preview while the camera is granted, or the failure message with a
//! manual entry fallback. Acquisition itself is driven by the scanner
//! interface; this component only binds the stream to the video element.

use std::cell::RefCell;
use std::rc::Rc;

use leptos::prelude::*;
use smartcart_core::{CameraController, CameraStatus};

use crate::camera::WebStream;

/// Shared camera controller, kept in local (non-Send) storage
pub type CameraHandle = StoredValue<Rc<RefCell<CameraController<WebStream>>>, LocalStorage>;

#[component]
pub fn CameraDialog(
    status: ReadSignal<CameraStatus>,
    camera: CameraHandle,
    #[prop(into)] on_close: Callback<()>,
    #[prop(into)] on_manual: Callback<()>,
) -> impl IntoView {
    let video_ref = NodeRef::<leptos::html::Video>::new();
    let error = Memo::new(move |_| status.get().error_message());
    let ready = Memo::new(move |_| status.get().is_ready());

    // Attach the stream once both the element and the grant exist
    Effect::new(move |_| {
        let Some(video) = video_ref.get() else { return };
        if ready.get() {
            camera.with_value(|c| {
                let controller = c.borrow();
                video.set_src_object(controller.stream().map(|s| s.media_stream()));
            });
        } else {
            video.set_src_object(None);
        }
    });

    view! {
        <div class="dialog-backdrop" on:click=move |_| on_close.run(())>
            <div class="dialog dialog-wide" on:click=|ev| ev.stop_propagation()>
                <h2 class="dialog-title">"📷 Scan Barcode or Package"</h2>

                {move || match error.get() {
                    Some(message) => view! {
                        <div class="camera-error">
                            <div class="alert alert-destructive">"⚠ " {message}</div>
                            <div class="manual-fallback">
                                <p>"You can still add items manually"</p>
                                <button class="primary-btn" on:click=move |_| on_manual.run(())>
                                    "+ Add Item Manually"
                                </button>
                            </div>
                        </div>
                    }.into_any(),
                    None => view! {
                        <div class="camera-preview">
                            <video node_ref=video_ref autoplay playsinline prop:muted=true></video>
                            <Show when=move || !ready.get()>
                                <div class="camera-loading">
                                    <div class="spinner"></div>
                                    "Loading camera..."
                                </div>
                            </Show>
                            <div class="scan-frame"></div>
                        </div>
                        <p class="scan-hint">"Position the barcode within the frame to scan"</p>
                    }.into_any(),
                }}

                <div class="dialog-actions">
                    <button class="outline-btn" on:click=move |_| on_close.run(())>"Close"</button>
                    <Show when=move || error.with(|e| e.is_none())>
                        <button class="outline-btn" on:click=move |_| on_manual.run(())>"⌨ Manual Input"</button>
                    </Show>
                </div>
            </div>
        </div>
    }
}
