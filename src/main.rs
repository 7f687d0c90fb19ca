use winit::{
    event::*,
    event_loop::{ControlFlow, EventLoop},
    window::WindowBuilder,
};

use fps_meter::config::MeterConfig;
use fps_meter::meter::FpsMeter;
use fps_meter::overlay::OverlayLayer;
use fps_meter::renderer::{RenderError, Renderer};
use fps_meter::time::FrameClock;

fn main() {
    env_logger::init();

    let config = match MeterConfig::from_env() {
        Ok(config) => config,
        Err(e) => {
            log::error!("invalid configuration: {}", e);
            std::process::exit(2);
        }
    };
    log::debug!("{:?}", config);

    let event_loop = EventLoop::new();
    let window = match WindowBuilder::new()
        .with_title("FPS Meter")
        .with_inner_size(winit::dpi::LogicalSize::new(800, 600))
        .build(&event_loop)
    {
        Ok(window) => window,
        Err(e) => {
            log::error!("failed to create window: {}", e);
            std::process::exit(1);
        }
    };

    let layer = OverlayLayer::new();
    let mut renderer = match pollster::block_on(Renderer::new(window, layer.clone())) {
        Ok(renderer) => renderer,
        Err(e) => {
            log::error!("failed to initialize renderer: {}", e);
            std::process::exit(1);
        }
    };

    let mut meter = FpsMeter::new(layer);
    meter.set_period_mode(config.period_mode);
    meter.set_enabled(config.enabled);

    let start_time = std::time::Instant::now();
    let mut clock = FrameClock::new(config.target_frame_rate, config.maximum_delta);

    event_loop.run(move |event, _, control_flow| {
        renderer.platform.handle_event(&event);

        match event {
            Event::WindowEvent {
                ref event,
                window_id
            } if window_id == renderer.window.id() => {
                match event {
                    WindowEvent::CloseRequested => *control_flow = ControlFlow::Exit,
                    WindowEvent::Resized(physical_size) => {
                        renderer.resize(*physical_size);
                    }
                    WindowEvent::ScaleFactorChanged { new_inner_size, .. } => {
                        renderer.resize(**new_inner_size);
                    }
                    WindowEvent::KeyboardInput {
                        input: KeyboardInput {
                            state: ElementState::Pressed,
                            virtual_keycode: Some(key),
                            ..
                        },
                        ..
                    } => match key {
                        VirtualKeyCode::F1 => meter.set_enabled(!meter.enabled()),
                        VirtualKeyCode::F2 => meter.set_period_mode(!meter.period_mode()),
                        VirtualKeyCode::Escape => *control_flow = ControlFlow::Exit,
                        _ => {}
                    },
                    _ => {}
                }
            }
            Event::RedrawRequested(_) => {
                renderer.platform.update_time(start_time.elapsed().as_secs_f64());
                match renderer.render() {
                    Ok(_) => {}
                    // Reconfigure the surface if lost
                    Err(RenderError::Surface(wgpu::SurfaceError::Lost)) => renderer.resize(renderer.size),
                    Err(RenderError::Surface(wgpu::SurfaceError::OutOfMemory)) => {
                        log::error!("out of memory");
                        *control_flow = ControlFlow::Exit
                    }
                    // Outdated and Timeout resolve on the next frame
                    Err(e) => log::warn!("{}", e),
                }
            }
            Event::MainEventsCleared => {
                clock.tick();
                meter.update(&clock);
                renderer.window.request_redraw();
            }
            _ => {}
        }
    });
}
