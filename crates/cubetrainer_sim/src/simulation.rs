use cubetrainer_core::cgmath::Quaternion;
use cubetrainer_core::interpolate::{self, InterpolateFn};
use cubetrainer_core::{
    EngineError, FaceletState, IncompleteFaceError, MoveEngine, MoveToken, PieceId, PieceRegistry,
};
use cubetrainer_prefs::{IncompleteFacePolicy, Interpolation, Preferences, ScramblePreferences};

use crate::{
    MoveQueue, ScrambleError, ScrambleParams, Solver, SolverAdapter, SolverError, Visualizer,
};

/// What happened during one call to [`CubeSimulation::tick()`].
#[derive(Debug, Default, Clone, PartialEq)]
pub struct TickEvents {
    /// Move popped from the queue and started.
    pub dispatched: Option<MoveToken>,
    /// Move that finished.
    pub completed: Option<MoveToken>,
    /// Unrecognized token popped from the queue and dropped.
    pub discarded: Option<String>,
    /// Move that could not start because its face was incomplete.
    pub aborted: Option<(MoveToken, IncompleteFaceError)>,
    /// Result of a solve that ran this tick.
    pub solve: Option<Result<Vec<MoveToken>, SolverError>>,
}
impl TickEvents {
    /// Returns whether nothing happened.
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }
}

/// Cube, move engine, and move queue, driven one frame at a time.
pub struct CubeSimulation {
    registry: PieceRegistry,
    engine: MoveEngine,
    queue: MoveQueue,
    /// Whether the cube has been initialized and moves may be dispatched.
    ready: bool,
    solver: SolverAdapter,
    visualizers: Vec<Box<dyn Visualizer>>,
    /// Facelets captured after the latest completed move.
    state: Option<FaceletState>,
    history: Vec<MoveToken>,

    policy: IncompleteFacePolicy,
    interpolation: InterpolateFn,
    solve_on_start: bool,
    scramble_prefs: ScramblePreferences,
}
impl std::fmt::Debug for CubeSimulation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CubeSimulation")
            .field("engine", &self.engine)
            .field("queue", &self.queue)
            .field("ready", &self.ready)
            .field("solver", &self.solver)
            .field("state", &self.state.map(|s| s.to_state_string()))
            .field("history", &self.history)
            .finish_non_exhaustive()
    }
}
impl CubeSimulation {
    /// Constructs a simulation with no pieces. Call
    /// [`CubeSimulation::initialize()`] before ticking.
    pub fn new(prefs: &Preferences) -> Self {
        Self::with_registry(PieceRegistry::new(), prefs)
    }
    /// Constructs a simulation of an existing cube. Call
    /// [`CubeSimulation::initialize()`] before ticking.
    pub fn with_registry(registry: PieceRegistry, prefs: &Preferences) -> Self {
        let anim = &prefs.animation;
        Self {
            registry,
            engine: MoveEngine::new(anim.twist_speed, anim.snap_epsilon),
            queue: MoveQueue::new(),
            ready: false,
            solver: SolverAdapter::default(),
            visualizers: vec![],
            state: None,
            history: vec![],

            policy: prefs.incomplete_face_policy,
            interpolation: match anim.interpolation {
                Interpolation::Linear => interpolate::LINEAR,
                Interpolation::Cosine => interpolate::COSINE,
            },
            solve_on_start: prefs.solver.solve_on_start,
            scramble_prefs: prefs.scramble,
        }
    }

    /// Populates the cube if it is empty, captures its facelets, and marks it
    /// ready. Visualizers are refreshed once.
    pub fn initialize(&mut self) -> Result<(), IncompleteFaceError> {
        if !self.registry.is_initialized() {
            self.registry = PieceRegistry::solved();
        }
        let state = FaceletState::capture(&self.registry)?;
        self.set_state(state);
        if !self.ready {
            self.ready = true;
            log::debug!("Cube ready: {state}");
            if self.solve_on_start {
                self.request_solve();
            }
        }
        Ok(())
    }

    /// Adds a visualizer. If the cube is ready, the visualizer is refreshed
    /// immediately.
    pub fn add_visualizer(&mut self, mut visualizer: Box<dyn Visualizer>) {
        if let Some(state) = &self.state {
            visualizer.refresh(state);
        }
        self.visualizers.push(visualizer);
    }
    /// Sets the external solver.
    pub fn set_solver(&mut self, solver: Box<dyn Solver>) {
        self.solver.set_solver(solver);
    }

    /// Appends move tokens to the queue.
    pub fn enqueue<S: Into<String>>(&mut self, tokens: impl IntoIterator<Item = S>) {
        self.queue.enqueue(tokens);
    }
    /// Appends moves to the queue.
    pub fn enqueue_moves(&mut self, moves: &[MoveToken]) {
        self.queue.enqueue(moves.iter().map(|m| m.to_string()));
    }

    /// Replaces the queue with a random scramble using the configured move
    /// count range.
    pub fn scramble(&mut self) -> Result<Vec<MoveToken>, ScrambleError> {
        self.scramble_with(&ScrambleParams::from_prefs(&self.scramble_prefs))
    }
    /// Replaces the queue with the scramble generated from `params`.
    ///
    /// This should not be called while a move is in progress.
    pub fn scramble_with(&mut self, params: &ScrambleParams) -> Result<Vec<MoveToken>, ScrambleError> {
        let moves = params.generate()?;
        if self.is_busy() {
            log::warn!("Replacing move queue while a move is in progress");
        }
        self.queue.replace(moves.iter().map(|m| m.to_string()));
        Ok(moves)
    }

    /// Requests a solve. The solver runs on the first tick where the cube is
    /// ready, no move is in progress, and the queue is empty.
    pub fn request_solve(&mut self) {
        self.solver.request();
    }

    /// Advances the simulation by `dt` seconds.
    ///
    /// If no move is in progress, the head of the queue is dispatched. The
    /// move in progress is then rotated by `dt` seconds' worth of angle.
    pub fn tick(&mut self, dt: f32) -> TickEvents {
        let mut events = TickEvents::default();
        if !self.ready {
            return events;
        }

        if self.solver.is_pending() && self.engine.is_idle() && self.queue.is_empty() {
            events.solve = Some(self.run_solver());
        }

        if self.engine.is_idle() {
            self.dispatch(&mut events);
        }

        if let Some(done) = self.engine.advance(dt, &mut self.registry) {
            self.history.push(done.token);
            events.completed = Some(done.token);
            match done.state {
                Ok(state) => self.set_state(state),
                Err(e) => log::error!("Error reading facelets after {}: {e}", done.token),
            }
        }

        events
    }

    fn dispatch(&mut self, events: &mut TickEvents) {
        let Some(raw) = self.queue.pop_front() else {
            return;
        };
        let token = match raw.parse::<MoveToken>() {
            Ok(token) => token,
            Err(e) => {
                log::warn!("Skipping move: {e}");
                events.discarded = Some(raw);
                return;
            }
        };
        match self.engine.begin(token, &mut self.registry) {
            Ok(()) => events.dispatched = Some(token),
            Err(EngineError::IncompleteFace(e)) => {
                match self.policy {
                    IncompleteFacePolicy::Drop => log::warn!("Dropping move {token}: {e}"),
                    IncompleteFacePolicy::Retry => {
                        log::warn!("Retrying move {token} next tick: {e}");
                        self.queue.push_front(raw);
                    }
                }
                events.aborted = Some((token, e));
            }
            Err(EngineError::Busy) => self.queue.push_front(raw),
        }
    }

    fn run_solver(&mut self) -> Result<Vec<MoveToken>, SolverError> {
        let state = FaceletState::capture(&self.registry)
            .map_err(|e| SolverError::NoSolution(e.to_string()));
        let result = state.and_then(|state| self.solver.run(&state, &mut self.queue));
        if let Err(e) = &result {
            log::error!("Solver failed: {e}");
        }
        result
    }

    /// Runs ticks until the queue is empty and no move is in progress. Returns
    /// the number of moves completed.
    pub fn catch_up(&mut self) -> usize {
        let mut completed = 0;
        while self.ready
            && (self.is_busy() || !self.queue.is_empty() || self.solver.is_pending())
        {
            let events = self.tick(f32::INFINITY);
            if events.completed.is_some() {
                completed += 1;
            }
            let stuck = events.is_empty()
                || (events.aborted.is_some() && self.policy == IncompleteFacePolicy::Retry);
            if stuck {
                log::warn!("Move queue is not making progress");
                break;
            }
        }
        completed
    }

    /// Discards all pending moves and history and restores a solved cube.
    pub fn reset(&mut self) {
        self.queue.clear();
        self.history.clear();
        if let Err(e) = self.load_registry(PieceRegistry::solved()) {
            log::error!("Error reading facelets after reset: {e}");
        }
    }

    /// Replaces the cube, abandoning any move in progress. Pending moves are
    /// kept.
    ///
    /// If the new cube's facelets cannot be read, the cube is still replaced
    /// and moves on its incomplete faces will be aborted.
    pub fn load_registry(&mut self, registry: PieceRegistry) -> Result<(), IncompleteFaceError> {
        self.registry = registry;
        self.engine = MoveEngine::new(self.engine.twist_speed, self.engine.snap_epsilon);
        let state = FaceletState::capture(&self.registry)?;
        self.set_state(state);
        Ok(())
    }

    fn set_state(&mut self, state: FaceletState) {
        self.state = Some(state);
        for visualizer in &mut self.visualizers {
            visualizer.refresh(&state);
        }
    }

    /// Returns whether a move is in progress. Nothing else may select a face
    /// to turn while this is `true`.
    pub fn is_busy(&self) -> bool {
        !self.engine.is_idle()
    }
    /// Returns whether the cube has been initialized.
    pub fn is_ready(&self) -> bool {
        self.ready
    }
    /// Returns the pieces of the cube.
    pub fn registry(&self) -> &PieceRegistry {
        &self.registry
    }
    /// Returns the move engine.
    pub fn engine(&self) -> &MoveEngine {
        &self.engine
    }
    /// Returns the pending moves.
    pub fn queue(&self) -> &MoveQueue {
        &self.queue
    }
    /// Returns the facelets captured after the latest completed move whose
    /// facelets could be read.
    pub fn state(&self) -> Option<&FaceletState> {
        self.state.as_ref()
    }
    /// Returns the 54-character facelet string captured after the latest
    /// completed move.
    pub fn state_string(&self) -> Option<String> {
        Some(self.state.as_ref()?.to_state_string())
    }
    /// Returns every completed move since the last reset, oldest first.
    pub fn history(&self) -> &[MoveToken] {
        &self.history
    }
    /// Returns the displayed rotation of a piece, including any turn in
    /// progress.
    pub fn piece_rotation(&self, piece: PieceId) -> Option<Quaternion<f32>> {
        self.engine
            .piece_rotation(&self.registry, piece, self.interpolation)
    }
}
