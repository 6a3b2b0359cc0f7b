//! Scanner Interface Component
//!
//! The two add-item tiles and the modal surface behind them. Surface
//! transitions go through `ScanSurface`, which says when the camera must be
//! acquired or released; a release always happens before the next surface is
//! shown.

use std::cell::RefCell;
use std::rc::Rc;

use leptos::prelude::*;
use leptos::task::spawn_local;
use smartcart_core::{acquire, CameraController, CameraDirective, CameraStatus, ManualEntryForm, NewItem, ScanSurface};

use crate::camera::WebCaptureDevice;
use crate::components::{CameraDialog, CameraHandle, ManualEntryDialog};
use crate::context::AppContext;

#[component]
pub fn ScannerInterface(#[prop(into)] on_add_item: Callback<NewItem>) -> impl IntoView {
    let ctx = use_context::<AppContext>().expect("AppContext should be provided");

    let (surface, set_surface) = signal(ScanSurface::Closed);
    let (camera_status, set_camera_status) = signal(CameraStatus::Idle);
    let camera: CameraHandle = StoredValue::new_local(Rc::new(RefCell::new(CameraController::new())));
    let form = RwSignal::new(ManualEntryForm::default());
    let unit = ctx.config.with_value(|c| c.default_unit.clone());

    let transition = move |step: fn(&mut ScanSurface) -> CameraDirective| {
        let mut next = surface.get_untracked();
        match step(&mut next) {
            CameraDirective::Acquire => {
                set_camera_status.set(CameraStatus::Requesting);
                let constraints = ctx.config.with_value(|c| c.capture_constraints());
                let controller = camera.get_value();
                spawn_local(async move {
                    let status = acquire(&controller, &WebCaptureDevice, &constraints).await;
                    // Page may have been torn down while waiting on the device
                    let _ = set_camera_status.try_set(status);
                });
            }
            CameraDirective::Release => {
                camera.with_value(|c| c.borrow_mut().close());
                set_camera_status.set(CameraStatus::Idle);
            }
            CameraDirective::None => {}
        }
        set_surface.set(next);
    };

    // Teardown releases the device too
    on_cleanup(move || {
        camera.try_with_value(|c| c.borrow_mut().close());
    });

    view! {
        <div class="scanner-tiles">
            <button class="tile tile-primary" on:click=move |_| transition(ScanSurface::open_camera)>
                <div class="tile-icon">"📷"</div>
                <h3>"Scan Item"</h3>
                <p>"Use camera to scan"</p>
            </button>
            <button class="tile tile-secondary" on:click=move |_| transition(ScanSurface::open_manual)>
                <div class="tile-icon">"⌨"</div>
                <h3>"Add Manually"</h3>
                <p>"Type item name"</p>
            </button>
        </div>

        <Show when=move || surface.get() == ScanSurface::Manual>
            <ManualEntryDialog
                form=form
                unit=unit.clone()
                on_submit=move |item: NewItem| {
                    on_add_item.run(item);
                    transition(ScanSurface::close);
                }
                on_cancel=move |_: ()| transition(ScanSurface::close)
            />
        </Show>

        <Show when=move || surface.get() == ScanSurface::Camera>
            <CameraDialog
                status=camera_status
                camera=camera
                on_close=move |_: ()| transition(ScanSurface::close)
                on_manual=move |_: ()| transition(ScanSurface::switch_to_manual)
            />
        </Show>
    }
}
