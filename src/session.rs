//! Frame loop owner.
//!
//! The session holds everything that lives across frames: the parameter
//! store, the artifact, the reaction simulation, the noise field, the
//! camera and the tick counter. Front ends only queue [`Command`]s and call
//! [`Session::frame`]; queued commands land at the next tick boundary, so a
//! frame always reads one consistent parameter snapshot.

use std::collections::VecDeque;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use log::{debug, info, warn};

use crate::artifact::{Artifact, FrameInputs};
use crate::camera::OrbitCamera;
use crate::control::{Command, KILL_STEP};
use crate::error::Result;
use crate::export::{self, SequenceReport};
use crate::geometry::{brightness, load_image};
use crate::noise::{LoopPhase, NoiseField};
use crate::params::{ParameterChanges, ParameterStore, Parameters, ReactionParameters};
use crate::reaction::{self, GrayScott, ReactionField};
use crate::render::Renderer;

/// Live sketch state
pub struct Session {
    store: ParameterStore,
    artifact: Artifact,
    reaction: GrayScott,
    noise: NoiseField,
    camera: OrbitCamera,
    tick: u64,
    commands: VecDeque<Command>,
    notification: Option<String>,
    settings_path: PathBuf,
    abort: Arc<AtomicBool>,
}

impl Session {
    /// Start a session at tick 0
    ///
    /// # Arguments
    /// * `params` - Initial (committed) parameters
    /// * `settings_path` - File used by the save/load settings commands
    pub fn new(params: Parameters, settings_path: impl Into<PathBuf>) -> Result<Self> {
        let artifact = Artifact::new(params.shape.clone(), params.animation.strategy);
        let mut reaction = GrayScott::from_params(&params.reaction);
        seed_reaction(&mut reaction, &params.reaction)?;

        info!(
            "Session started: {} shape, {} strategy, {} frame loop",
            params.shape.kind(),
            params.animation.strategy,
            params.animation.num_frames
        );

        Ok(Self {
            noise: NoiseField::new(params.noise_seed),
            camera: OrbitCamera::new(params.camera.clone()),
            store: ParameterStore::new(params),
            artifact,
            reaction,
            tick: 0,
            commands: VecDeque::new(),
            notification: None,
            settings_path: settings_path.into(),
            abort: Arc::new(AtomicBool::new(false)),
        })
    }

    /// Committed parameter snapshot
    pub fn params(&self) -> &Parameters {
        self.store.snapshot()
    }

    /// Pending parameters, committed at the next frame
    pub fn edit(&mut self) -> &mut Parameters {
        self.store.edit()
    }

    pub fn tick(&self) -> u64 {
        self.tick
    }

    pub fn artifact(&self) -> &Artifact {
        &self.artifact
    }

    pub fn reaction(&self) -> &GrayScott {
        &self.reaction
    }

    pub fn camera(&self) -> &OrbitCamera {
        &self.camera
    }

    pub fn camera_mut(&mut self) -> &mut OrbitCamera {
        &mut self.camera
    }

    /// Last control-surface message
    pub fn notification(&self) -> Option<&str> {
        self.notification.as_deref()
    }

    pub fn settings_path(&self) -> &Path {
        &self.settings_path
    }

    /// Flag checked between frames of a sequence export
    pub fn abort_handle(&self) -> Arc<AtomicBool> {
        Arc::clone(&self.abort)
    }

    /// Queue `command` for the next tick boundary
    pub fn queue(&mut self, command: Command) {
        debug!("Queued {}", command);
        self.commands.push_back(command);
    }

    /// Run one frame: apply commands, commit, step, prepare, render, advance
    ///
    /// Export commands wait until this frame has rendered, so they see any
    /// edits queued alongside them. A shape whose setup fails returns the
    /// error before rendering; the tick does not advance, queued exports stay
    /// queued and the next frame retries the setup.
    pub fn frame(&mut self, renderer: &mut dyn Renderer) -> Result<()> {
        let mut exports = Vec::new();
        while let Some(command) = self.commands.pop_front() {
            if command.is_export() {
                exports.push(command);
            } else {
                self.apply(command)?;
            }
        }
        let changes = self.store.commit();
        self.react(changes);

        let prepared = {
            let params = self.store.snapshot();
            let phase = LoopPhase::new(self.tick, params.animation.num_frames);

            // Shapes reading the field build from memory only, so their setup
            // cannot fail and a stepped field is never stepped again on retry
            let uses_reaction = params.shape.uses_reaction(&params.reaction);
            if uses_reaction {
                reaction::step(&mut self.reaction, &params.reaction, &self.noise, phase);
            }

            let mut inputs = FrameInputs::new(params, &self.noise, self.tick);
            if uses_reaction {
                inputs.reaction = Some(&self.reaction as &dyn ReactionField);
            }
            self.artifact.prepare(&inputs)
        };
        if let Err(e) = prepared {
            for command in exports.into_iter().rev() {
                self.commands.push_front(command);
            }
            return Err(e);
        }

        self.artifact.render(renderer)?;
        for command in exports {
            self.apply(command)?;
        }
        self.artifact.advance();

        self.tick += 1;
        Ok(())
    }

    /// Write the artifact as it stands to the configured single-frame path
    pub fn export_frame(&mut self) -> Result<PathBuf> {
        let path = self.params().export.frame_path();
        let artifact = &self.artifact;
        export::write_frame(&path, |renderer| artifact.render(renderer))?;
        self.notify("SHAPE EXPORTED.".to_string());
        Ok(path)
    }

    /// Export one full loop starting at the current tick
    ///
    /// The reaction simulation is reset first so every export starts from
    /// the same field. Each frame is set up, displaced and written before
    /// the next one begins.
    pub fn export_sequence(&mut self, abort: &AtomicBool) -> Result<SequenceReport> {
        self.reset_reaction()?;

        let params = self.store.snapshot().clone();
        let start = self.tick;
        let count = params.animation.sequence_length();
        let uses_reaction = params.shape.uses_reaction(&params.reaction);
        info!("Exporting {} frames from tick {}", count, start);

        let noise = &self.noise;
        let artifact = &mut self.artifact;
        let sim = &mut self.reaction;
        let report = export::export_sequence(
            &params.export.directory,
            &params.export.sequence_prefix,
            count,
            abort,
            |k, renderer| {
                let tick = start + k as u64;
                let mut inputs = FrameInputs::new(&params, noise, tick);
                if uses_reaction {
                    reaction::step(sim, &params.reaction, noise, inputs.phase());
                    inputs.reaction = Some(&*sim as &dyn ReactionField);
                }
                artifact.prepare(&inputs)?;
                artifact.render(renderer)?;
                artifact.advance();
                Ok(())
            },
        )?;

        self.notify(format!("{} FRAMES EXPORTED.", report.frames_written));
        Ok(report)
    }

    fn apply(&mut self, command: Command) -> Result<()> {
        match command {
            Command::Recreate => self.artifact.mark_stale(),
            Command::ExportFrame => {
                self.export_frame()?;
            }
            Command::ExportSequence => {
                self.abort.store(false, Ordering::Relaxed);
                let abort = Arc::clone(&self.abort);
                self.export_sequence(&abort)?;
            }
            Command::SaveSettings => {
                self.store.save(&self.settings_path)?;
                self.notify("SETTINGS SAVED.".to_string());
            }
            Command::LoadSettings => {
                self.store.load(&self.settings_path)?;
                self.notify("SETTINGS LOADED.".to_string());
            }
            Command::ResetRotation => {
                self.artifact.transform_mut().reset_rotation();
                self.notify("ROTATION RESET.".to_string());
            }
            Command::ResetScale => {
                self.artifact.transform_mut().reset_scale();
                self.store.edit().transform.scale = 1.0;
                self.notify("SCALE RESET.".to_string());
            }
            Command::ToggleAnimation => {
                let animation = &mut self.store.edit().animation;
                animation.animated = !animation.animated;
                let message = if animation.animated {
                    "ANIMATION MODE ACTIVE."
                } else {
                    "ANIMATION MODE DISABLED."
                };
                self.notify(message.to_string());
            }
            Command::ResetExtrusion => {
                self.store.edit().animation.reset_extrusion();
                self.notify("EXTRUSION RESET.".to_string());
            }
            Command::SelectModulation(modulation) => {
                self.store.edit().animation.modulation = modulation;
                self.notify(modulation.label().to_string());
            }
            Command::SaveCamera(slot) => {
                if self.camera.save(slot) {
                    self.notify(format!("CAMERA {} SAVED.", slot));
                }
            }
            Command::RestoreCamera(slot) => {
                if self.camera.restore(slot) {
                    self.notify(format!("CAMERA {} LOADED.", slot));
                }
            }
            Command::FeedPreset(n) => {
                let f = ReactionParameters::feed_preset(n);
                self.store.edit().reaction.coefficients.f = f;
                self.notify(format!("GS F: {:.3}", f));
            }
            Command::IncreaseKill | Command::DecreaseKill => {
                let delta = if command == Command::IncreaseKill {
                    KILL_STEP
                } else {
                    -KILL_STEP
                };
                let coefficients = &mut self.store.edit().reaction.coefficients;
                coefficients.k += delta;
                let k = coefficients.k;
                self.notify(format!("GS K: {:.3}", k));
            }
            Command::ResetReaction => {
                self.reset_reaction()?;
                self.notify("GREY SCOTT RESET.".to_string());
            }
            Command::SetShape(shape) => self.store.edit().shape = shape,
            Command::SetStrategy(strategy) => self.store.edit().animation.strategy = strategy,
        }
        Ok(())
    }

    /// Bring derived state in line with a fresh commit
    fn react(&mut self, changes: ParameterChanges) {
        if !changes.any {
            return;
        }
        let params = self.store.snapshot();

        if changes.shape {
            self.artifact.set_shape(params.shape.clone());
        } else if params.auto_update {
            self.artifact.mark_stale();
        }
        if changes.strategy {
            self.artifact.set_strategy(params.animation.strategy);
        }
        if changes.noise_seed {
            self.noise = NoiseField::new(params.noise_seed);
        }
        if changes.camera {
            self.camera.configure(params.camera.clone());
        }
        if changes.reaction {
            let wanted = &params.reaction;
            if wanted.width != self.reaction.width() || wanted.height != self.reaction.height() {
                self.reaction = GrayScott::from_params(wanted);
                if let Err(e) = seed_reaction(&mut self.reaction, wanted) {
                    warn!("Reaction field left unseeded: {}", e);
                }
            } else {
                self.reaction.set_coefficients(wanted.coefficients);
            }
        }
    }

    fn reset_reaction(&mut self) -> Result<()> {
        self.reaction.reset();
        seed_reaction(&mut self.reaction, &self.store.snapshot().reaction)
    }

    fn notify(&mut self, message: String) {
        info!("{}", message);
        self.notification = Some(message);
    }
}

/// Seed dark pixels of the configured image into `sim`
fn seed_reaction(sim: &mut GrayScott, params: &ReactionParameters) -> Result<()> {
    if let Some(path) = &params.seed_image {
        let image = load_image(path)?;
        sim.seed_image(image.width() as usize, image.height() as usize, |x, y| {
            brightness(image.get_pixel(x as u32, y as u32))
        });
    }
    Ok(())
}
