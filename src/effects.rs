use std::time::Duration;
use ratatui::prelude::*;
use tachyonfx::{fx, Effect, EffectTimer, Interpolation};

/// Manages visual effects for the application
pub struct EffectManager {
    /// Startup fade-in effect
    startup_fx: Option<Effect>,
    /// Pulse while an advisor request is in flight
    loading_fx: Option<Effect>,
    /// Flash when the body switches tabs
    tab_fx: Option<Effect>,
    /// Flash when a metric or advisory lands
    result_fx: Option<Effect>,
}

impl Default for EffectManager {
    fn default() -> Self {
        Self::new()
    }
}

impl EffectManager {
    pub fn new() -> Self {
        Self {
            startup_fx: Some(Self::create_startup_effect()),
            loading_fx: Some(Self::create_loading_effect()),
            tab_fx: None,
            result_fx: None,
        }
    }

    /// Create the initial fade-in effect for app startup
    fn create_startup_effect() -> Effect {
        fx::fade_from(
            (0, 0, 0),  // fg color as tuple
            (0, 0, 0),  // bg color as tuple
            EffectTimer::from_ms(800, Interpolation::QuadOut),
        )
    }

    /// Create a subtle pulse effect for loading state
    fn create_loading_effect() -> Effect {
        fx::ping_pong(fx::fade_to_fg(
            (180, 180, 220),
            EffectTimer::from_ms(600, Interpolation::SineInOut),
        ))
    }

    fn create_tab_effect() -> Effect {
        fx::fade_from(
            (116, 199, 236), // sapphire
            (0, 0, 0),
            EffectTimer::from_ms(250, Interpolation::QuadOut),
        )
    }

    fn create_result_effect(ok: bool) -> Effect {
        let color = if ok {
            (80, 200, 120)  // Green
        } else {
            (200, 80, 80)   // Red
        };
        fx::fade_from(
            color,
            (0, 0, 0),
            EffectTimer::from_ms(400, Interpolation::QuadOut),
        )
    }

    pub fn trigger_tab_change(&mut self) {
        self.tab_fx = Some(Self::create_tab_effect());
    }

    pub fn trigger_result(&mut self, ok: bool) {
        self.result_fx = Some(Self::create_result_effect(ok));
    }

    /// Process the startup effect over the whole screen
    pub fn process(&mut self, elapsed: Duration, buf: &mut Buffer, area: Rect) {
        Self::run_once(&mut self.startup_fx, elapsed, buf, area);
    }

    /// Process loading effects (call on loading indicator area)
    pub fn process_loading(&mut self, elapsed: Duration, buf: &mut Buffer, area: Rect, is_loading: bool) {
        if is_loading {
            if let Some(ref mut fx) = self.loading_fx {
                fx.process(elapsed.into(), buf, area);
                // Don't clear - it loops via ping_pong
            }
        }
    }

    /// Process tab and result flashes over the body
    pub fn process_body(&mut self, elapsed: Duration, buf: &mut Buffer, area: Rect) {
        Self::run_once(&mut self.tab_fx, elapsed, buf, area);
        Self::run_once(&mut self.result_fx, elapsed, buf, area);
    }

    /// Check if startup animation is still playing
    pub fn is_starting_up(&self) -> bool {
        self.startup_fx.is_some()
    }

    fn run_once(slot: &mut Option<Effect>, elapsed: Duration, buf: &mut Buffer, area: Rect) {
        if let Some(fx) = slot.as_mut() {
            fx.process(elapsed.into(), buf, area);
            if fx.done() {
                *slot = None;
            }
        }
    }
}
