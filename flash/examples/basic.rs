//! Basic example - shows a flash above a tab bar and prints each frame
//!
//! Run with `RUST_LOG=flash=debug` to see the lifecycle.

use std::rc::Rc;
use std::time::Duration;

use flash::host::FixedHostResolver;
use flash::prelude::*;
use flash::runtime::ManualRuntime;

fn main() -> flash::Result<()> {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("flash=info"));
    tracing_subscriber::fmt().with_env_filter(filter).with_target(true).init();

    // An iPhone-sized screen with a navigation bar and a tab bar
    let screen = Rc::new(
        ViewTree::new(Rect::new(0.0, 0.0, 390.0, 844.0)).with_safe_area_insets(EdgeInsets::new(47.0, 0.0, 34.0, 0.0)),
    );
    screen.add_node(None, NodeRole::NavigationBar, Rect::new(0.0, 47.0, 390.0, 44.0));
    screen.add_node(None, NodeRole::TabBar, Rect::new(0.0, 761.0, 390.0, 83.0));

    let runtime = ManualRuntime::new();
    let surface: Rc<dyn HostSurface> = screen.clone();
    let platform = Platform::new(
        Rc::new(FixedHostResolver::new(&surface)),
        runtime.driver.clone(),
        runtime.scheduler.clone(),
    );
    // measure with real fonts when available
    #[cfg(feature = "cosmic")]
    let platform = platform.with_text_measurer(Rc::new(flash::render::CosmicTextMeasurer::new()));
    platform.install();

    let config = Configuration::from_toml(
        r##"
        alignment = "bottom"

        [background]
        color = "#323232"
        corner_radius = 14.0

        [title]
        color = "#ffffff"
        font_size = 15.0
        font_weight = "semibold"
        number_of_lines = 1
        "##,
    )?;

    let flash = Flash::new("Copied to clipboard", None, Some(config));
    flash.show();

    let step = Duration::from_millis(100);
    while flash.is_visible() {
        runtime.advance(step);
        let visual = flash.visual();
        println!(
            "{:>5}ms {:?} opacity={:.2} offset={:+.1} scale={:.3}",
            runtime.now().as_millis(),
            flash.phase(),
            visual.opacity,
            visual.transform.translation.y,
            visual.transform.scale,
        );
        for primitive in flash.render().primitives {
            if let Primitive::Rect { frame, .. } = primitive {
                println!("        background at ({:.1}, {:.1}) {}x{}", frame.min_x(), frame.min_y(), frame.width(), frame.height());
            }
        }
    }

    Ok(())
}
