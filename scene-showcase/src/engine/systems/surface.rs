use bevy::prelude::*;
use bevy::window::{PrimaryWindow, WindowResized};

use crate::rpc::web_rpc::WebRpcInterface;

/// One-time surface correction on entering the running state: the host
/// page's first layout happens after the engine measured the canvas, so
/// the measured size is re-applied once before the first visible frame.
pub fn correct_initial_surface(mut windows: Query<&mut Window, With<PrimaryWindow>>) {
    let Ok(mut window) = windows.single_mut() else {
        return;
    };

    #[cfg(target_arch = "wasm32")]
    {
        let measured = web_sys::window().and_then(|w| {
            let width = w.inner_width().ok()?.as_f64()?;
            let height = w.inner_height().ok()?.as_f64()?;
            Some((width as f32, height as f32))
        });
        if let Some((width, height)) = measured {
            window.resolution.set(width, height);
            info!("initial surface corrected to {width}x{height}");
            return;
        }
    }

    let width = window.resolution.width();
    let height = window.resolution.height();
    window.resolution.set(width, height);
    info!("surface ready at {width}x{height}");
}

/// Window resizes outside the per-frame loop: forward the new size to
/// the frontend (the engine itself already reacts to the event).
pub fn notify_surface_resized(
    mut events: EventReader<WindowResized>,
    mut rpc_interface: ResMut<WebRpcInterface>,
) {
    for event in events.read() {
        rpc_interface.send_notification(
            "surface_resized",
            serde_json::json!({
                "width": event.width,
                "height": event.height
            }),
        );
    }
}
