// ============================================================================
// PREVIEW WINDOW
// ============================================================================

use log::{error, info};
use pixels::{Pixels, SurfaceTexture};
use std::sync::mpsc::Receiver;
use std::time::{Duration, Instant};
use winit::dpi::LogicalSize;
use winit::event::{Event, WindowEvent};
use winit::event_loop::{ControlFlow, EventLoop};
use winit::window::WindowBuilder;

use crate::color::Color;
use crate::command::WidgetCommand;
use crate::config::ViewerConfig;
use crate::widget::CircularProgress;

/// Show the widget in a window until it is closed.
pub fn show(
    widget: CircularProgress,
    config: &ViewerConfig,
) -> Result<(), Box<dyn std::error::Error>> {
    run_window(widget, config, None)
}

/// Show the widget and apply every command arriving on `receiver`.
pub fn show_with_commands(
    widget: CircularProgress,
    config: &ViewerConfig,
    receiver: Receiver<WidgetCommand>,
) -> Result<(), Box<dyn std::error::Error>> {
    run_window(widget, config, Some(receiver))
}

fn run_window(
    mut widget: CircularProgress,
    config: &ViewerConfig,
    receiver: Option<Receiver<WidgetCommand>>,
) -> Result<(), Box<dyn std::error::Error>> {
    let size = widget.size();

    let event_loop = EventLoop::new()?;
    let window = WindowBuilder::new()
        .with_title(&config.title)
        .with_inner_size(LogicalSize::new(size as f64, size as f64))
        .with_resizable(false)
        .build(&event_loop)?;

    let window = std::sync::Arc::new(window);
    let window_clone = window.clone();

    let physical = window.inner_size();
    let surface_texture = SurfaceTexture::new(physical.width, physical.height, &window);
    let mut pixels = Pixels::new(size, size, surface_texture)?;

    let background = config.background;
    let frame_duration = Duration::from_secs_f64(1.0 / config.max_framerate.max(1.0));
    let mut last_frame = Instant::now();

    info!("showing '{}' at {}x{}", widget.surface_id(), size, size);

    event_loop.run(move |event, window_target| {
        window_target.set_control_flow(ControlFlow::Poll);
        match event {
            Event::WindowEvent { event, .. } => match event {
                WindowEvent::CloseRequested => {
                    window_target.exit();
                }
                WindowEvent::Resized(new_size) => {
                    let _ = pixels.resize_surface(new_size.width, new_size.height);
                }
                WindowEvent::RedrawRequested => {
                    if let Some(ref receiver) = receiver {
                        let before = widget.size();
                        drain_commands(&mut widget, receiver);
                        let after = widget.size();
                        if after != before {
                            let _ = pixels.resize_buffer(after, after);
                            let _ = window_clone
                                .request_inner_size(LogicalSize::new(after as f64, after as f64));
                        }
                    }
                    flatten(widget.surface().frame(), pixels.frame_mut(), background);
                    if let Err(err) = pixels.render() {
                        error!("render failed: {}", err);
                        window_target.exit();
                    }
                }
                _ => {}
            },
            Event::AboutToWait => {
                if last_frame.elapsed() >= frame_duration {
                    window_clone.request_redraw();
                    last_frame = Instant::now();
                }
            }
            _ => {}
        }
    })?;

    Ok(())
}

/// Apply everything queued without blocking; bad commands are logged and
/// dropped so the window keeps running.
fn drain_commands(widget: &mut CircularProgress, receiver: &Receiver<WidgetCommand>) -> usize {
    let mut applied = 0;
    while let Ok(command) = receiver.try_recv() {
        match widget.apply(command) {
            Ok(()) => applied += 1,
            Err(err) => error!("{}", err),
        }
    }
    applied
}

/// Composite the straight-alpha surface over an opaque background.
fn flatten(src: &[u8], dst: &mut [u8], background: Color) {
    for (s, d) in src.chunks_exact(4).zip(dst.chunks_exact_mut(4)) {
        let a = s[3] as f32 / 255.0;
        let mix = |c: u8, bg: u8| (c as f32 * a + bg as f32 * (1.0 - a)).round() as u8;
        d.copy_from_slice(&[
            mix(s[0], background.r),
            mix(s[1], background.g),
            mix(s[2], background.b),
            0xff,
        ]);
    }
}
