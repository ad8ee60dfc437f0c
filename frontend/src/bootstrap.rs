use std::cell::Cell;

use once_cell::unsync::OnceCell;
use web_sys::window;
use yew::AppHandle;

use crate::analytics::{InsightsProbe, Telemetry};
use crate::app::App;
use crate::config::{AppConfig, MountTarget};
use crate::error::{describe_js, StartupError};
use crate::mount::{DomMounter, MountState, Mounter};
use crate::styles;

thread_local! {
    static STARTUP: StartupLatch = StartupLatch::new();
    static APPLICATION: OnceCell<AppHandle<App>> = OnceCell::new();
}

/// Fires once. The first `fire` wins whether or not the guarded work later
/// succeeds.
#[derive(Debug, Default)]
pub struct StartupLatch {
    fired: Cell<bool>,
}

impl StartupLatch {
    pub const fn new() -> Self {
        Self {
            fired: Cell::new(false),
        }
    }

    pub fn fire(&self) -> Result<(), StartupError> {
        if self.fired.replace(true) {
            return Err(StartupError::AlreadyStarted);
        }
        Ok(())
    }

    pub fn has_fired(&self) -> bool {
        self.fired.get()
    }
}

/// One page load's startup sequence: activate telemetry, then mount.
///
/// Telemetry is issued before the mount but its outcome is never allowed to
/// stop the mount. A bootstrap runs at most once, even when the mount fails.
pub struct Bootstrap<T, M> {
    telemetry: T,
    mounter: M,
    target: MountTarget,
    state: MountState,
    latch: StartupLatch,
}

impl<T, M> Bootstrap<T, M>
where
    T: Telemetry,
    M: Mounter,
{
    pub fn new(telemetry: T, mounter: M, target: MountTarget) -> Self {
        Self {
            telemetry,
            mounter,
            target,
            state: MountState::Unmounted,
            latch: StartupLatch::new(),
        }
    }

    pub fn state(&self) -> MountState {
        self.state
    }

    pub fn target(&self) -> &MountTarget {
        &self.target
    }

    pub fn run(&mut self) -> Result<M::Handle, StartupError> {
        self.latch.fire()?;

        if let Err(err) = self.telemetry.activate() {
            log::warn!("analytics activation failed, continuing startup: {}", err);
        }

        let handle = self.mounter.mount(&self.target)?;
        self.state = MountState::Mounted;
        log::info!("mounted application at {}", self.target);
        Ok(handle)
    }
}

fn apply_stylesheet() {
    let Some(document) = window().and_then(|w| w.document()) else {
        log::warn!("no document available, global styles not applied");
        return;
    };
    match styles::apply_global_styles(&document) {
        Ok(true) => log::debug!("global styles applied"),
        Ok(false) => log::debug!("global styles already present"),
        Err(err) => log::warn!("failed to apply global styles: {}", describe_js(&err)),
    }
}

/// Page entry point. Runs the startup sequence once and keeps the
/// application handle alive for the rest of the page's life.
pub fn start(config: AppConfig) -> Result<(), StartupError> {
    STARTUP.with(StartupLatch::fire)?;

    APPLICATION.with(|application| {
        apply_stylesheet();

        let mut bootstrap = Bootstrap::new(
            InsightsProbe::new(config.analytics),
            DomMounter::<App>::new(),
            config.mount,
        );
        let handle = bootstrap.run()?;
        application
            .set(handle)
            .map_err(|_| StartupError::AlreadyStarted)
    })
}

/// True once `start` has been entered, whatever its outcome.
pub fn is_started() -> bool {
    STARTUP.with(StartupLatch::has_fired)
}
