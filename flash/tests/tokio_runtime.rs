//! Flash lifecycle on the tokio-backed scheduler and driver

use std::rc::Rc;
use std::time::Duration;

use flash::host::FixedHostResolver;
use flash::prelude::*;
use flash::runtime::{ImmediateDriver, TokioDriver, TokioScheduler};
use tokio::task::LocalSet;
use tokio::time::sleep;

fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

fn screen() -> Rc<ViewTree> {
    Rc::new(ViewTree::new(Rect::new(0.0, 0.0, 390.0, 844.0)).with_safe_area_insets(EdgeInsets::new(44.0, 0.0, 34.0, 0.0)))
}

fn install(screen: &Rc<ViewTree>, driver: Rc<dyn AnimationDriver>, scheduler: Rc<TokioScheduler>) {
    init_tracing();
    let surface: Rc<dyn HostSurface> = screen.clone();
    Platform::new(Rc::new(FixedHostResolver::new(&surface)), driver, scheduler).install();
}

#[tokio::test(start_paused = true)]
async fn test_show_and_auto_dismiss() {
    LocalSet::new()
        .run_until(async {
            let screen = screen();
            let scheduler = Rc::new(TokioScheduler::new());
            let driver = Rc::new(TokioDriver::new());
            install(&screen, driver.clone(), scheduler.clone());

            let flash = Flash::new("Uploaded", None, Some(Configuration::default()));
            flash.show();
            assert_eq!(flash.phase(), Phase::Entering);
            assert_eq!(driver.running_count(), 1);

            sleep(Duration::from_millis(500)).await;
            assert_eq!(flash.phase(), Phase::Visible);
            assert_eq!(flash.visual(), VisualState::IDENTITY);
            assert_eq!(scheduler.pending_count(), 1);

            // dismiss timer is due around 2.35s
            sleep(Duration::from_secs(2)).await;
            assert_eq!(flash.phase(), Phase::Exiting);

            sleep(Duration::from_millis(500)).await;
            assert_eq!(flash.phase(), Phase::Detached);
            assert!(screen.flashes().is_empty());
            assert_eq!(driver.running_count(), 0);
        })
        .await;
}

#[tokio::test(start_paused = true)]
async fn test_hide_interrupts_entrance() {
    LocalSet::new()
        .run_until(async {
            let screen = screen();
            let scheduler = Rc::new(TokioScheduler::new());
            install(&screen, Rc::new(TokioDriver::new()), scheduler.clone());

            let flash = Flash::new("Uploaded", None, Some(Configuration::default()));
            flash.show();
            sleep(Duration::from_millis(100)).await;
            flash.hide();
            assert_eq!(flash.phase(), Phase::Exiting);

            sleep(Duration::from_secs(1)).await;
            assert_eq!(flash.phase(), Phase::Detached);
            assert_eq!(scheduler.pending_count(), 0);
        })
        .await;
}

#[tokio::test(start_paused = true)]
async fn test_immediate_driver_with_tokio_timers() {
    LocalSet::new()
        .run_until(async {
            let screen = screen();
            let scheduler = Rc::new(TokioScheduler::new());
            install(&screen, Rc::new(ImmediateDriver), scheduler.clone());

            let flash = Flash::new("Uploaded", None, Some(Configuration::default()));
            flash.show_with(None, Duration::from_secs(1));
            assert_eq!(flash.phase(), Phase::Visible);

            sleep(Duration::from_millis(1100)).await;
            assert_eq!(flash.phase(), Phase::Detached);
            assert!(screen.flashes().is_empty());
        })
        .await;
}

#[tokio::test(start_paused = true)]
async fn test_replacing_flash_on_tokio() {
    LocalSet::new()
        .run_until(async {
            let screen = screen();
            install(&screen, Rc::new(TokioDriver::new()), Rc::new(TokioScheduler::new()));

            let first = Flash::new("First", None, Some(Configuration::default()));
            let second = Flash::new("Second", None, Some(Configuration::default().alignment(Alignment::Bottom)));
            first.show();
            sleep(Duration::from_millis(400)).await;
            second.show();
            assert_eq!(first.phase(), Phase::Exiting);

            sleep(Duration::from_millis(400)).await;
            assert_eq!(first.phase(), Phase::Detached);
            assert_eq!(second.phase(), Phase::Visible);
            assert_eq!(screen.flashes().len(), 1);
        })
        .await;
}
