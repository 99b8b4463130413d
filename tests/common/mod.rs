#![allow(dead_code)]

use std::collections::HashMap;

use deskshell::{
    input::{
        keyboard::{KeyEvent, KeyboardHandle, ModifiersState},
        pointer::{AxisFrame, AxisSource, ButtonEvent, MotionEvent, PointerHandle},
        touch::{self, TouchHandle},
    },
    shell::{launcher_menu::LauncherMenuHandler, Layer, NoMemory, RoleError, ShellHost},
    utils::{
        ClientId, Local, Logical, OutputId, Point, Rectangle, SeatId, Serial, SerialCounter, Size, SurfaceId,
        ViewId,
    },
};

pub fn init_logging() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

#[derive(Debug, Default)]
pub struct Keyboard {
    pub focus: Option<SurfaceId>,
    pub grab_serial: Option<Serial>,
    pub captured: bool,
    pub keys: Vec<KeyEvent>,
    pub modifiers: Vec<ModifiersState>,
}

impl KeyboardHandle for Keyboard {
    fn focus(&self) -> Option<SurfaceId> {
        self.focus
    }
    fn set_focus(&mut self, focus: Option<SurfaceId>) {
        self.focus = focus;
    }
    fn grab_serial(&self) -> Option<Serial> {
        self.grab_serial
    }
    fn is_captured(&self) -> bool {
        self.captured
    }
    fn start_capture(&mut self) {
        self.captured = true;
    }
    fn end_capture(&mut self) {
        self.captured = false;
    }
    fn send_key(&mut self, event: &KeyEvent) {
        self.keys.push(*event);
    }
    fn send_modifiers(&mut self, modifiers: &ModifiersState) {
        self.modifiers.push(*modifiers);
    }
}

#[derive(Debug, Default)]
pub struct Pointer {
    pub location: Point<f64, Logical>,
    pub button_count: usize,
    pub focus: Option<(ViewId, Point<f64, Local>)>,
    pub grab_serial: Option<Serial>,
    pub grab_time: u32,
    pub captured: bool,
    pub motions: Vec<MotionEvent>,
    pub buttons: Vec<ButtonEvent>,
    pub axis: Vec<AxisFrame>,
    pub axis_sources: Vec<AxisSource>,
    pub frames: usize,
}

impl PointerHandle for Pointer {
    fn location(&self) -> Point<f64, Logical> {
        self.location
    }
    fn button_count(&self) -> usize {
        self.button_count
    }
    fn focus(&self) -> Option<ViewId> {
        self.focus.map(|(view, _)| view)
    }
    fn set_focus(&mut self, focus: Option<(ViewId, Point<f64, Local>)>) {
        self.focus = focus;
    }
    fn grab_serial(&self) -> Option<Serial> {
        self.grab_serial
    }
    fn grab_time(&self) -> u32 {
        self.grab_time
    }
    fn is_captured(&self) -> bool {
        self.captured
    }
    fn start_capture(&mut self) {
        self.captured = true;
    }
    fn end_capture(&mut self) {
        self.captured = false;
    }
    fn send_motion(&mut self, event: &MotionEvent) {
        self.motions.push(*event);
    }
    fn send_button(&mut self, event: &ButtonEvent) {
        self.buttons.push(*event);
    }
    fn send_axis(&mut self, frame: &AxisFrame) {
        self.axis.push(*frame);
    }
    fn send_axis_source(&mut self, source: AxisSource) {
        self.axis_sources.push(source);
    }
    fn send_frame(&mut self) {
        self.frames += 1;
    }
}

#[derive(Debug, Default)]
pub struct Touch {
    pub focus: Option<ViewId>,
    pub grab_serial: Option<Serial>,
    pub captured: bool,
    pub downs: Vec<touch::DownEvent>,
    pub ups: Vec<touch::UpEvent>,
    pub motions: Vec<touch::MotionEvent>,
    pub frames: usize,
}

impl TouchHandle for Touch {
    fn focus(&self) -> Option<ViewId> {
        self.focus
    }
    fn set_focus(&mut self, focus: Option<ViewId>) {
        self.focus = focus;
    }
    fn grab_serial(&self) -> Option<Serial> {
        self.grab_serial
    }
    fn is_captured(&self) -> bool {
        self.captured
    }
    fn start_capture(&mut self) {
        self.captured = true;
    }
    fn end_capture(&mut self) {
        self.captured = false;
    }
    fn send_down(&mut self, event: &touch::DownEvent) {
        self.downs.push(*event);
    }
    fn send_up(&mut self, event: &touch::UpEvent) {
        self.ups.push(*event);
    }
    fn send_motion(&mut self, event: &touch::MotionEvent) {
        self.motions.push(*event);
    }
    fn send_frame(&mut self) {
        self.frames += 1;
    }
}

#[derive(Debug, Default)]
pub struct SeatDevices {
    pub keyboard: Option<Keyboard>,
    pub pointer: Option<Pointer>,
    pub touch: Option<Touch>,
}

impl SeatDevices {
    pub fn full() -> Self {
        SeatDevices {
            keyboard: Some(Keyboard::default()),
            pointer: Some(Pointer::default()),
            touch: Some(Touch::default()),
        }
    }
}

#[derive(Debug)]
pub struct SurfaceState {
    pub size: Size<i32, Logical>,
    pub role: Option<&'static str>,
    pub output: Option<OutputId>,
}

#[derive(Debug)]
pub struct ViewState {
    pub surface: SurfaceId,
    pub position: Point<i32, Logical>,
    pub layer: Option<Layer>,
}

/// A scripted scene host keeping everything in memory
#[derive(Debug, Default)]
pub struct TestHost {
    next_id: u64,
    serials: SerialCounter,
    pub seats: Vec<(SeatId, SeatDevices)>,
    pub outputs: Vec<(OutputId, Rectangle<i32, Logical>)>,
    pub surfaces: HashMap<SurfaceId, SurfaceState>,
    pub views: HashMap<ViewId, ViewState>,
    pub stacking: Vec<ViewId>,
    pub out_of_memory: bool,
    pub dismissals: Vec<ClientId>,
    pub damaged: Vec<SurfaceId>,
    pub damaged_below: Vec<ViewId>,
    pub repaints: usize,
}

impl TestHost {
    pub fn new() -> Self {
        init_logging();
        TestHost::default()
    }

    fn next_id(&mut self) -> u64 {
        self.next_id += 1;
        self.next_id
    }

    pub fn add_seat(&mut self, devices: SeatDevices) -> SeatId {
        let seat = SeatId::from_raw(self.next_id());
        self.seats.push((seat, devices));
        seat
    }

    pub fn add_output(&mut self, geometry: Rectangle<i32, Logical>) -> OutputId {
        let output = OutputId::from_raw(self.next_id());
        self.outputs.push((output, geometry));
        output
    }

    pub fn add_surface(&mut self, size: impl Into<Size<i32, Logical>>) -> SurfaceId {
        let surface = SurfaceId::from_raw(self.next_id());
        self.surfaces.insert(
            surface,
            SurfaceState {
                size: size.into(),
                role: None,
                output: None,
            },
        );
        surface
    }

    /// A regular application window, mapped in the normal layer
    pub fn add_window(
        &mut self,
        position: impl Into<Point<i32, Logical>>,
        size: impl Into<Size<i32, Logical>>,
    ) -> (SurfaceId, ViewId) {
        let surface = self.add_surface(size);
        let view = self.create_view(&surface).expect("test host allocation");
        self.set_view_position(&view, position.into());
        self.map_view(&view, Layer::Normal);
        (surface, view)
    }

    pub fn destroy_surface(&mut self, surface: &SurfaceId) -> Vec<ViewId> {
        self.surfaces.remove(surface);
        let views: Vec<ViewId> = self
            .views
            .iter()
            .filter(|(_, state)| state.surface == *surface)
            .map(|(view, _)| *view)
            .collect();
        for view in &views {
            self.views.remove(view);
            self.stacking.retain(|v| v != view);
        }
        views
    }

    /// A key press that can start a grab, stamped with the next serial
    pub fn press_key(&mut self, seat: &SeatId) -> Serial {
        let serial = self.serials.next_serial();
        self.keyboard_of(seat).grab_serial = Some(serial);
        serial
    }

    pub fn press_button(&mut self, seat: &SeatId) -> Serial {
        let serial = self.serials.next_serial();
        self.pointer_of(seat).grab_serial = Some(serial);
        serial
    }

    pub fn touch_down(&mut self, seat: &SeatId) -> Serial {
        let serial = self.serials.next_serial();
        self.touch_of(seat).grab_serial = Some(serial);
        serial
    }

    pub fn remove_seat(&mut self, seat: &SeatId) {
        self.seats.retain(|(id, _)| id != seat);
    }

    pub fn remove_output(&mut self, output: &OutputId) {
        self.outputs.retain(|(id, _)| id != output);
    }

    fn devices(&mut self, seat: &SeatId) -> Option<&mut SeatDevices> {
        self.seats
            .iter_mut()
            .find(|(id, _)| id == seat)
            .map(|(_, devices)| devices)
    }

    pub fn keyboard_of(&mut self, seat: &SeatId) -> &mut Keyboard {
        self.keyboard(seat).expect("seat has a keyboard")
    }

    pub fn pointer_of(&mut self, seat: &SeatId) -> &mut Pointer {
        self.pointer(seat).expect("seat has a pointer")
    }

    pub fn touch_of(&mut self, seat: &SeatId) -> &mut Touch {
        self.touch(seat).expect("seat has a touch device")
    }

    pub fn view_state(&self, view: &ViewId) -> &ViewState {
        self.views.get(view).expect("view exists")
    }
}

impl ShellHost for TestHost {
    type Keyboard = Keyboard;
    type Pointer = Pointer;
    type Touch = Touch;

    fn seats(&self) -> Vec<SeatId> {
        self.seats.iter().map(|(id, _)| *id).collect()
    }

    fn keyboard(&mut self, seat: &SeatId) -> Option<&mut Keyboard> {
        self.devices(seat).and_then(|devices| devices.keyboard.as_mut())
    }

    fn pointer(&mut self, seat: &SeatId) -> Option<&mut Pointer> {
        self.devices(seat).and_then(|devices| devices.pointer.as_mut())
    }

    fn touch(&mut self, seat: &SeatId) -> Option<&mut Touch> {
        self.devices(seat).and_then(|devices| devices.touch.as_mut())
    }

    fn outputs(&self) -> Vec<OutputId> {
        self.outputs.iter().map(|(id, _)| *id).collect()
    }

    fn output_geometry(&self, output: &OutputId) -> Option<Rectangle<i32, Logical>> {
        self.outputs
            .iter()
            .find(|(id, _)| id == output)
            .map(|(_, geometry)| *geometry)
    }

    fn surface_alive(&self, surface: &SurfaceId) -> bool {
        self.surfaces.contains_key(surface)
    }

    fn surface_size(&self, surface: &SurfaceId) -> Option<Size<i32, Logical>> {
        self.surfaces.get(surface).map(|state| state.size)
    }

    fn surface_output(&self, surface: &SurfaceId) -> Option<OutputId> {
        self.surfaces.get(surface).and_then(|state| state.output)
    }

    fn surface_primary_view(&self, surface: &SurfaceId) -> Option<ViewId> {
        self.stacking
            .iter()
            .find(|view| self.views.get(*view).map(|state| state.surface) == Some(*surface))
            .copied()
    }

    fn set_role(&mut self, surface: &SurfaceId, role: &'static str) -> Result<(), RoleError> {
        let state = self.surfaces.get_mut(surface).ok_or(RoleError::Taken)?;
        match state.role {
            Some(existing) if existing != role => Err(RoleError::Incompatible { existing }),
            _ => {
                state.role = Some(role);
                Ok(())
            }
        }
    }

    fn damage_surface(&mut self, surface: &SurfaceId) {
        self.damaged.push(*surface);
    }

    fn create_view(&mut self, surface: &SurfaceId) -> Result<ViewId, NoMemory> {
        if self.out_of_memory {
            return Err(NoMemory);
        }
        let view = ViewId::from_raw(self.next_id());
        self.views.insert(
            view,
            ViewState {
                surface: *surface,
                position: Point::default(),
                layer: None,
            },
        );
        self.stacking.push(view);
        Ok(view)
    }

    fn destroy_view(&mut self, view: &ViewId) {
        self.damaged_below.push(*view);
        self.views.remove(view);
        self.stacking.retain(|v| v != view);
    }

    fn view_alive(&self, view: &ViewId) -> bool {
        self.views.contains_key(view)
    }

    fn view_position(&self, view: &ViewId) -> Option<Point<i32, Logical>> {
        self.views.get(view).map(|state| state.position)
    }

    fn set_view_position(&mut self, view: &ViewId, position: Point<i32, Logical>) {
        if let Some(state) = self.views.get_mut(view) {
            state.position = position;
        }
    }

    fn view_is_mapped(&self, view: &ViewId) -> bool {
        self.views.get(view).map(|state| state.layer.is_some()).unwrap_or(false)
    }

    fn map_view(&mut self, view: &ViewId, layer: Layer) {
        if let Some(state) = self.views.get_mut(view) {
            state.layer = Some(layer);
        }
    }

    fn damage_below(&mut self, view: &ViewId) {
        self.damaged_below.push(*view);
    }

    fn pick_view(&self, location: Point<f64, Logical>) -> Option<(ViewId, Point<f64, Local>)> {
        // later entries are stacked above earlier ones within a layer
        self.stacking
            .iter()
            .filter_map(|view| {
                let state = self.views.get(view)?;
                let layer = state.layer?;
                let size = self.surfaces.get(&state.surface)?.size;
                let geometry = Rectangle::new(state.position, size).to_f64();
                geometry.contains(location).then_some((layer, *view, geometry.loc))
            })
            .max_by_key(|(layer, _, _)| *layer)
            .map(|(_, view, origin)| {
                let local = location - origin;
                (view, (local.x, local.y).into())
            })
    }

    fn schedule_repaint(&mut self) {
        self.repaints += 1;
    }
}

impl LauncherMenuHandler for TestHost {
    fn dismissed(&mut self, client: &ClientId) {
        self.dismissals.push(*client);
    }
}
