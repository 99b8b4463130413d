//! Launcher menu
//!
//! The launcher menu is a compositor-wide singleton a single client can bind to. The
//! bound client can then show one surface at a time as a popup menu, either centered
//! on an output, at the pointer, or attached below a rectangle of another surface.
//!
//! While the menu is shown, the keyboard, pointer and touch devices of one seat are
//! captured: the menu gets the keyboard focus, no other surface can get the pointer
//! focus, and a click outside of the menu dismisses it. The client is notified of
//! the dismissal through [`LauncherMenuHandler::dismissed`].
//!
//! ## How to use it
//!
//! Create a [`LauncherMenu`] once and keep it next to your compositor state. Your state
//! must implement [`LauncherMenuHandler`], which extends the [`ShellHost`] contract.
//!
//! Then forward to it:
//!
//! - the client requests: [`bind`](LauncherMenu::bind), [`show`](LauncherMenu::show),
//!   [`show_at_pointer`](LauncherMenu::show_at_pointer),
//!   [`show_at_surface`](LauncherMenu::show_at_surface) and [`unbind`](LauncherMenu::unbind)
//!   (also used for the `destroy` request),
//! - the commits of surfaces through [`surface_committed`](LauncherMenu::surface_committed),
//! - the destruction of surfaces, views, seats and outputs through the `*_destroyed` methods,
//! - every event of a device that [is captured](crate::input::pointer::PointerHandle::is_captured)
//!   through [`with_capture`](LauncherMenu::with_capture).
//!
//! ```no_run
//! # use deskshell::shell::launcher_menu::{LauncherMenu, LauncherMenuHandler, PointerCapture};
//! # use deskshell::input::pointer::ButtonEvent;
//! # use deskshell::utils::SeatId;
//! fn on_captured_button<H: LauncherMenuHandler>(
//!     menu: &mut LauncherMenu,
//!     host: &mut H,
//!     seat: SeatId,
//!     event: ButtonEvent,
//! ) {
//!     menu.with_capture(host, &seat, |capture, host| capture.pointer_button(host, &event));
//! }
//! ```

use std::time::Duration;

use indexmap::IndexMap;
use thiserror::Error;
use tracing::{debug, instrument, trace, warn};

use crate::{
    input::{keyboard::KeyboardHandle, pointer::PointerHandle, touch::TouchHandle},
    shell::{Layer, NoMemory, RoleError, ShellHost},
    utils::{ClientId, Logical, OutputId, Rectangle, SeatId, Serial, SurfaceId, ViewId},
};

mod grab;
pub mod position;

pub use self::grab::{
    CaptureStatus, KeyboardCapture, PointerCapture, SeatCapture, TouchCapture,
};
pub use self::position::{Anchor, MenuPosition};

use self::grab::CaptureTarget;

/// Role name given to menu surfaces
pub const LAUNCHER_MENU_ROLE: &str = "ww_launcher_menu";

/// Errors reported to the client issuing a launcher menu request
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum LauncherMenuError {
    /// The launcher menu is bound by another client
    #[error("interface object already bound")]
    AlreadyBound,
    /// The surface cannot become the menu
    #[error(transparent)]
    RoleConflict(#[from] RoleError),
    /// The serial does not match the last grab-initiating event of the seat
    #[error("invalid serial")]
    StaleEvent,
    /// The compositor failed to allocate the menu view
    #[error(transparent)]
    NoMemory(#[from] NoMemory),
}

/// Configuration of a [`LauncherMenu`]
#[derive(Debug, Clone)]
pub struct LauncherMenuConfig {
    /// How long a button must have been held since the opening click before
    /// its release outside of the menu dismisses it
    pub dismiss_delay: Duration,
    /// Layer the menu view is inserted into on its first commit
    pub layer: Layer,
}

impl Default for LauncherMenuConfig {
    fn default() -> Self {
        LauncherMenuConfig {
            dismiss_delay: Duration::from_millis(500),
            layer: Layer::Ui,
        }
    }
}

/// Compositor state notified by the launcher menu
pub trait LauncherMenuHandler: ShellHost {
    /// The menu of the bound client was dismissed
    fn dismissed(&mut self, client: &ClientId);
}

/// Why a capture ends
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum EndReason {
    /// The user dismissed the menu or the compositor took the devices back
    Dismissed,
    /// The menu surface went away
    SurfaceDestroyed,
    /// The client unbound the launcher menu
    Unbound,
}

/// The launcher menu singleton
#[derive(Debug)]
pub struct LauncherMenu {
    config: LauncherMenuConfig,
    binding: Option<ClientId>,
    output: Option<OutputId>,
    surface: Option<SurfaceId>,
    view: Option<ViewId>,
    position: MenuPosition,
    grab_seat: Option<SeatId>,
    seats: IndexMap<SeatId, SeatCapture>,
}

impl Default for LauncherMenu {
    fn default() -> Self {
        LauncherMenu::new(LauncherMenuConfig::default())
    }
}

impl LauncherMenu {
    /// Create the launcher menu singleton
    pub fn new(config: LauncherMenuConfig) -> Self {
        LauncherMenu {
            config,
            binding: None,
            output: None,
            surface: None,
            view: None,
            position: MenuPosition::Centered,
            grab_seat: None,
            seats: IndexMap::new(),
        }
    }

    /// The client currently bound to the launcher menu
    pub fn binding(&self) -> Option<ClientId> {
        self.binding
    }

    /// The surface currently shown as menu
    pub fn surface(&self) -> Option<SurfaceId> {
        self.surface
    }

    /// The view of the menu surface
    pub fn view(&self) -> Option<ViewId> {
        self.view
    }

    /// The output the menu is centered on
    pub fn output(&self) -> Option<OutputId> {
        self.output
    }

    /// How the current menu is positioned
    pub fn position(&self) -> MenuPosition {
        self.position
    }

    /// The seat whose devices are currently captured
    pub fn capture_seat(&self) -> Option<SeatId> {
        self.grab_seat
    }

    /// The cached capture of a seat, if a menu was ever shown on it
    pub fn seat_capture(&self, seat: &SeatId) -> Option<&SeatCapture> {
        self.seats.get(seat)
    }

    /// All cached seat captures
    pub fn captures(&self) -> impl ExactSizeIterator<Item = &SeatCapture> {
        self.seats.values()
    }

    /// Bind a client to the launcher menu
    pub fn bind(&mut self, client: ClientId) -> Result<(), LauncherMenuError> {
        if self.binding.is_some() {
            warn!(?client, "Launcher menu already bound");
            return Err(LauncherMenuError::AlreadyBound);
        }
        debug!(?client, "Launcher menu bound");
        self.binding = Some(client);
        Ok(())
    }

    /// The bound client went away or destroyed its launcher menu object
    ///
    /// Any shown menu is released without notification.
    pub fn unbind<H: LauncherMenuHandler>(&mut self, host: &mut H, client: &ClientId) {
        if self.binding.as_ref() != Some(client) {
            return;
        }
        debug!(?client, "Launcher menu unbound");
        self.binding = None;
        self.end_capture(host, EndReason::Unbound);
        self.release(host);
    }

    /// Show a surface as menu, centered on an output
    ///
    /// The devices of the first seat of the compositor are captured.
    #[instrument(level = "debug", skip(self, host))]
    pub fn show<H: LauncherMenuHandler>(
        &mut self,
        host: &mut H,
        client: &ClientId,
        surface: SurfaceId,
    ) -> Result<(), LauncherMenuError> {
        let seat = host.seats().first().copied();
        self.show_common(host, client, surface, seat, MenuPosition::Centered)
    }

    /// Show a surface as menu at the pointer location of a seat
    ///
    /// The serial must be the one of the last grab-initiating button press of the seat.
    #[instrument(level = "debug", skip(self, host))]
    pub fn show_at_pointer<H: LauncherMenuHandler>(
        &mut self,
        host: &mut H,
        client: &ClientId,
        surface: SurfaceId,
        seat: SeatId,
        serial: Serial,
    ) -> Result<(), LauncherMenuError> {
        let valid = host
            .pointer(&seat)
            .map(|pointer| pointer.grab_serial() == Some(serial))
            .unwrap_or(false);
        if !valid {
            warn!(?seat, ?serial, "Rejecting menu at pointer, invalid serial");
            return Err(LauncherMenuError::StaleEvent);
        }

        self.show_common(host, client, surface, Some(seat), MenuPosition::AtPointer)
    }

    /// Show a surface as menu right below a rectangle of another surface
    ///
    /// The surface is the one focused by the device of the seat whose last
    /// grab-initiating event has the given serial, devices being checked in keyboard,
    /// pointer, touch order. The rectangle is relative to that surface.
    #[instrument(level = "debug", skip(self, host))]
    pub fn show_at_surface<H: LauncherMenuHandler>(
        &mut self,
        host: &mut H,
        client: &ClientId,
        surface: SurfaceId,
        seat: SeatId,
        serial: Serial,
        rect: Rectangle<i32, Logical>,
    ) -> Result<(), LauncherMenuError> {
        let Some(target) = Self::serial_target(host, &seat, serial) else {
            warn!(?seat, ?serial, "Rejecting menu at surface, invalid serial");
            return Err(LauncherMenuError::StaleEvent);
        };

        let anchor = Anchor {
            view: Some(target),
            rect,
        };
        self.show_common(host, client, surface, Some(seat), MenuPosition::AtSurface(anchor))
    }

    /// Run an event of a captured device through the seat capture
    ///
    /// Returns `false` if the seat is not the one currently captured by the menu, in
    /// which case the event should go through the regular dispatch.
    pub fn with_capture<H, F>(&mut self, host: &mut H, seat: &SeatId, f: F) -> bool
    where
        H: LauncherMenuHandler,
        F: FnOnce(&mut SeatCapture, &mut H) -> CaptureStatus,
    {
        if self.grab_seat.as_ref() != Some(seat) {
            trace!(?seat, "Event for a seat without menu capture");
            return false;
        }
        let Some(capture) = self.seats.get_mut(seat) else {
            return false;
        };

        if f(capture, host) == CaptureStatus::Dismiss {
            self.end_capture(host, EndReason::Dismissed);
            self.release(host);
        }
        true
    }

    /// A surface committed new content
    ///
    /// The menu view is mapped on its first commit, and positioned on every commit.
    pub fn surface_committed<H: LauncherMenuHandler>(&mut self, host: &mut H, surface: &SurfaceId) {
        if self.surface.as_ref() != Some(surface) {
            return;
        }
        let Some(view) = self.view.filter(|view| host.view_alive(view)) else {
            return;
        };

        if !host.view_is_mapped(&view) {
            trace!(?view, layer = ?self.config.layer, "Mapping launcher menu");
            host.map_view(&view, self.config.layer);
        }

        self.update_position(host);
    }

    /// A surface got destroyed
    ///
    /// If it was the menu, the capture ends and the client is told its menu is gone.
    pub fn surface_destroyed<H: LauncherMenuHandler>(&mut self, host: &mut H, surface: &SurfaceId) {
        if self.surface.as_ref() != Some(surface) {
            return;
        }
        debug!(?surface, "Launcher menu surface destroyed");
        self.surface = None;
        self.end_capture(host, EndReason::SurfaceDestroyed);
        self.release(host);
    }

    /// A view got destroyed
    pub fn view_destroyed<H: LauncherMenuHandler>(&mut self, host: &mut H, view: &ViewId) {
        if self.view.as_ref() == Some(view) {
            host.damage_below(view);
            self.view = None;
        }
        if let MenuPosition::AtSurface(anchor) = &mut self.position {
            if anchor.view.as_ref() == Some(view) {
                anchor.view = None;
            }
        }
        for capture in self.seats.values_mut() {
            capture.forget_view(view);
        }
    }

    /// A seat got destroyed
    ///
    /// Its cached capture is dropped. If the menu was capturing it, the menu is dismissed.
    pub fn seat_destroyed<H: LauncherMenuHandler>(&mut self, host: &mut H, seat: &SeatId) {
        if self.grab_seat.as_ref() == Some(seat) {
            debug!(?seat, "Capturing seat destroyed");
            self.end_capture(host, EndReason::Dismissed);
            self.release(host);
        }
        self.seats.shift_remove(seat);
    }

    /// An output got destroyed
    ///
    /// A menu on that output moves to the first remaining output.
    pub fn output_destroyed<H: LauncherMenuHandler>(&mut self, host: &mut H, output: &OutputId) {
        if self.output.as_ref() != Some(output) {
            return;
        }
        self.output = host.outputs().into_iter().find(|o| o != output);
        debug!(?output, replacement = ?self.output, "Launcher menu output destroyed");

        if self.position == MenuPosition::Centered {
            self.update_position(host);
        }
    }

    fn show_common<H: LauncherMenuHandler>(
        &mut self,
        host: &mut H,
        client: &ClientId,
        surface: SurfaceId,
        seat: Option<SeatId>,
        position: MenuPosition,
    ) -> Result<(), LauncherMenuError> {
        if self.binding.as_ref() != Some(client) {
            warn!(?client, "Menu request from a client that does not own the launcher menu");
            return Err(LauncherMenuError::AlreadyBound);
        }

        if let Some(current) = self.surface {
            if host.surface_alive(&current) {
                warn!(?surface, ?current, "Launcher menu already shown");
                return Err(RoleError::Taken.into());
            }
            // missed destruction, drop the stale menu
            self.surface_destroyed(host, &current);
        }

        let view = host.create_view(&surface)?;
        if let Err(err) = host.set_role(&surface, LAUNCHER_MENU_ROLE) {
            warn!(?surface, %err, "Surface cannot become the launcher menu");
            host.destroy_view(&view);
            return Err(err.into());
        }

        self.surface = Some(surface);
        self.view = Some(view);
        self.position = position;
        self.output = seat
            .and_then(|seat| host.keyboard(&seat).and_then(|keyboard| keyboard.focus()))
            .and_then(|focus| host.surface_output(&focus))
            .or_else(|| host.outputs().first().copied());
        debug!(?surface, ?view, ?seat, output = ?self.output, "Showing launcher menu");

        if let Some(seat) = seat {
            let dismiss_delay = self.config.dismiss_delay;
            let capture = self
                .seats
                .entry(seat)
                .or_insert_with(|| SeatCapture::new(seat, dismiss_delay));
            capture.start(
                host,
                CaptureTarget {
                    surface,
                    view: Some(view),
                },
            );
            self.grab_seat = Some(seat);
        }

        Ok(())
    }

    /// End the capture of the shown menu, if any, and tell the client its menu is gone
    ///
    /// A menu shown while the compositor had no seat is notified as well.
    fn end_capture<H: LauncherMenuHandler>(&mut self, host: &mut H, reason: EndReason) {
        if let Some(seat) = self.grab_seat.take() {
            if let Some(capture) = self.seats.get_mut(&seat) {
                capture.end(host);
            }
            debug!(?seat, ?reason, "Launcher menu capture ended");
        }

        if reason != EndReason::Unbound {
            if let Some(client) = self.binding.as_ref() {
                host.dismissed(client);
            }
        }
    }

    fn release<H: ShellHost>(&mut self, host: &mut H) {
        if let Some(view) = self.view.take() {
            if host.view_alive(&view) {
                host.destroy_view(&view);
            }
        }
        self.surface = None;
        self.position = MenuPosition::Centered;
    }

    fn serial_target<H: ShellHost>(host: &mut H, seat: &SeatId, serial: Serial) -> Option<ViewId> {
        let keyboard_focus = host
            .keyboard(seat)
            .filter(|keyboard| keyboard.grab_serial() == Some(serial))
            .map(|keyboard| keyboard.focus());
        if let Some(focus) = keyboard_focus {
            return focus.and_then(|surface| host.surface_primary_view(&surface));
        }

        if let Some(pointer) = host.pointer(seat) {
            if pointer.grab_serial() == Some(serial) {
                return pointer.focus();
            }
        }

        if let Some(touch) = host.touch(seat) {
            if touch.grab_serial() == Some(serial) {
                return touch.focus();
            }
        }

        None
    }

    fn update_position<H: ShellHost>(&mut self, host: &mut H) {
        let (Some(surface), Some(view)) = (self.surface, self.view) else {
            return;
        };
        if !host.surface_alive(&surface) || !host.view_alive(&view) {
            return;
        }

        let location = match self.position {
            MenuPosition::Centered => self
                .output
                .and_then(|output| host.output_geometry(&output))
                .zip(host.surface_size(&surface))
                .map(|(output, size)| position::centered(output, size)),
            MenuPosition::AtPointer => self
                .grab_seat
                .and_then(|seat| host.pointer(&seat).map(|pointer| pointer.location()))
                .map(position::at_pointer),
            MenuPosition::AtSurface(anchor) => anchor
                .view
                .and_then(|target| host.view_position(&target))
                .map(|origin| position::at_surface(origin, anchor.rect)),
        };

        let Some(location) = location else {
            trace!(?view, position = ?self.position, "Launcher menu position unresolved");
            return;
        };

        trace!(?view, ?location, "Positioning launcher menu");
        host.set_view_position(&view, location);
        host.damage_surface(&surface);
        host.schedule_repaint();
    }
}
