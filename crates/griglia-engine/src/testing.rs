//! Programmable mock backends shared by the engine's unit tests.

use std::cell::{Cell, RefCell};
use std::collections::HashMap;

use griglia_core::{
    Error, ManagedWindow, Point, PrimaryBackend, Rect, Result, ScriptBackend, ScriptCommand, Size,
};

/// A scriptable primary backend.
///
/// Positions and sizes live in per-window maps seeded lazily from
/// each window's snapshot bounds. Failures are driven by `fail_calls`
/// (1-based `set_position` call numbers that fail) and the blanket
/// `fail_all_*` switches. When `reachable` is off, every per-window
/// query errs with `Unreachable`, matching the trait contract.
pub(crate) struct MockPrimary {
    pub permission: bool,
    pub reachable: bool,
    pub can_pos: bool,
    pub can_size: bool,
    pub fail_all_moves: bool,
    pub fail_all_resizes: bool,
    pub fail_calls: Vec<u32>,
    calls: Cell<u32>,
    positions: RefCell<HashMap<usize, Point>>,
    sizes: RefCell<HashMap<usize, Size>>,
    pub move_log: RefCell<Vec<(usize, Point)>>,
    pub raise_log: RefCell<Vec<usize>>,
}

impl MockPrimary {
    pub fn new() -> Self {
        Self {
            permission: true,
            reachable: true,
            can_pos: true,
            can_size: true,
            fail_all_moves: false,
            fail_all_resizes: false,
            fail_calls: Vec::new(),
            calls: Cell::new(0),
            positions: RefCell::new(HashMap::new()),
            sizes: RefCell::new(HashMap::new()),
            move_log: RefCell::new(Vec::new()),
            raise_log: RefCell::new(Vec::new()),
        }
    }

    /// Number of `set_position` calls seen so far.
    pub fn move_attempts(&self) -> u32 {
        self.calls.get()
    }

    /// Last successfully applied position for a window.
    pub fn position_of(&self, id: usize) -> Option<Point> {
        self.positions.borrow().get(&id).copied()
    }
}

impl PrimaryBackend for MockPrimary {
    fn has_permission(&self) -> bool {
        self.permission
    }

    fn position(&self, window: &ManagedWindow) -> Result<Point> {
        if !self.reachable {
            return Err(Error::Unreachable(window.title.clone()));
        }
        Ok(self
            .positions
            .borrow()
            .get(&window.id)
            .copied()
            .unwrap_or_else(|| window.bounds.origin()))
    }

    fn set_position(&self, window: &ManagedWindow, position: Point) -> Result<()> {
        if !self.reachable {
            return Err(Error::Unreachable(window.title.clone()));
        }
        let call = self.calls.get() + 1;
        self.calls.set(call);
        if self.fail_all_moves || self.fail_calls.contains(&call) {
            return Err(Error::Backend(format!("move rejected (call {call})")));
        }
        self.positions.borrow_mut().insert(window.id, position);
        self.move_log.borrow_mut().push((window.id, position));
        Ok(())
    }

    fn size(&self, window: &ManagedWindow) -> Result<Size> {
        if !self.reachable {
            return Err(Error::Unreachable(window.title.clone()));
        }
        Ok(self
            .sizes
            .borrow()
            .get(&window.id)
            .copied()
            .unwrap_or_else(|| window.bounds.size()))
    }

    fn set_size(&self, window: &ManagedWindow, size: Size) -> Result<()> {
        if !self.reachable {
            return Err(Error::Unreachable(window.title.clone()));
        }
        if self.fail_all_resizes {
            return Err(Error::Backend("resize rejected".into()));
        }
        self.sizes.borrow_mut().insert(window.id, size);
        Ok(())
    }

    fn can_set_position(&self, window: &ManagedWindow) -> Result<bool> {
        if !self.reachable {
            return Err(Error::Unreachable(window.title.clone()));
        }
        Ok(self.can_pos)
    }

    fn can_set_size(&self, window: &ManagedWindow) -> Result<bool> {
        if !self.reachable {
            return Err(Error::Unreachable(window.title.clone()));
        }
        Ok(self.can_size)
    }

    fn raise(&self, window: &ManagedWindow) -> Result<()> {
        self.raise_log.borrow_mut().push(window.id);
        Ok(())
    }
}

/// A scripting backend that always answers the same way and records
/// every command it receives.
pub(crate) struct MockScript {
    pub succeed: bool,
    pub exists: bool,
    pub log: RefCell<Vec<(String, String, ScriptCommand)>>,
}

impl MockScript {
    pub fn new(succeed: bool) -> Self {
        Self {
            succeed,
            exists: true,
            log: RefCell::new(Vec::new()),
        }
    }

    pub fn commands(&self) -> Vec<ScriptCommand> {
        self.log.borrow().iter().map(|(_, _, c)| *c).collect()
    }
}

impl ScriptBackend for MockScript {
    fn run(&self, app: &str, title: &str, command: ScriptCommand) -> Result<bool> {
        self.log
            .borrow_mut()
            .push((app.to_string(), title.to_string(), command));
        Ok(self.succeed)
    }

    fn window_exists(&self, _app: &str, _title: &str) -> bool {
        self.exists
    }
}

/// A window with the given id at `(x, y)`, 400×300, owned by `app`.
pub(crate) fn window(id: usize, app: &str, x: f64, y: f64) -> ManagedWindow {
    ManagedWindow::new(id, &format!("Window {id}"), 1000 + id as i32, app, Rect::new(x, y, 400.0, 300.0))
}

/// An [`griglia_core::ArrangeConfig`] with every delay zeroed so tests
/// never sleep.
pub(crate) fn fast_config() -> griglia_core::ArrangeConfig {
    griglia_core::ArrangeConfig {
        gradual_step_delay_ms: 0,
        retry_base_delay_ms: 0,
        settle_delay_ms: 0,
        pacing_delay_ms: 0,
        ..Default::default()
    }
}
