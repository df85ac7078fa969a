//! Slotted-path lifecycle behavior, driven through a scripted device rig.
//!
//! The rig implements the `FfDevice`/`EffectSlot` seams with shared
//! counters so tests can observe exactly which hardware calls each slot
//! received, including after the feedback object is gone.

use std::cell::RefCell;
use std::rc::Rc;

use kickback::driver::{CreateError, EffectSlot, FfDevice, HwError};
use kickback::translate::EffectParams;
use kickback::{
    Direction, Effect, EffectHandle, EffectId, FeedbackError, ForceFeedback, ForceKind,
    SlottedFeedback, SupportMatrix, SupportMatrixBuilder, TimingCaps, Waveform,
};

#[derive(Default)]
struct SlotStats {
    started: u32,
    stopped: u32,
    unload_attempts: u32,
    unloaded: u32,
    updates: u32,
    released: u32,
    fail_unload: bool,
    fail_update: bool,
}

struct RigSlot {
    stats: Rc<RefCell<SlotStats>>,
}

impl EffectSlot for RigSlot {
    fn start(&mut self) -> Result<(), HwError> {
        self.stats.borrow_mut().started += 1;
        Ok(())
    }

    fn stop(&mut self) -> Result<(), HwError> {
        self.stats.borrow_mut().stopped += 1;
        Ok(())
    }

    fn unload(&mut self) -> Result<(), HwError> {
        let mut stats = self.stats.borrow_mut();
        stats.unload_attempts += 1;
        if stats.fail_unload {
            return Err(HwError("effect still held by the device".into()));
        }
        stats.unloaded += 1;
        Ok(())
    }

    fn set_parameters(&mut self, _params: &EffectParams) -> Result<(), HwError> {
        let mut stats = self.stats.borrow_mut();
        if stats.fail_update {
            return Err(HwError("parameter block rejected".into()));
        }
        stats.updates += 1;
        Ok(())
    }
}

impl Drop for RigSlot {
    fn drop(&mut self) {
        self.stats.borrow_mut().released += 1;
    }
}

struct RigState {
    slots: Vec<Rc<RefCell<SlotStats>>>,
    fail_create_full: bool,
    gain_writes: Vec<u32>,
    autocenter_writes: Vec<bool>,
    memory_load: Result<u16, String>,
}

impl RigState {
    fn new() -> Self {
        Self {
            slots: Vec::new(),
            fail_create_full: false,
            gain_writes: Vec::new(),
            autocenter_writes: Vec::new(),
            memory_load: Ok(0),
        }
    }
}

struct RigDevice {
    state: Rc<RefCell<RigState>>,
}

impl FfDevice for RigDevice {
    type Slot = RigSlot;

    fn create_effect(&mut self, _params: &EffectParams) -> Result<RigSlot, CreateError> {
        let mut state = self.state.borrow_mut();
        if state.fail_create_full {
            return Err(CreateError::DeviceFull);
        }
        let stats = Rc::new(RefCell::new(SlotStats::default()));
        state.slots.push(Rc::clone(&stats));
        Ok(RigSlot { stats })
    }

    fn set_gain(&mut self, device_gain: u32) -> Result<(), HwError> {
        self.state.borrow_mut().gain_writes.push(device_gain);
        Ok(())
    }

    fn set_autocenter(&mut self, enabled: bool) -> Result<(), HwError> {
        self.state.borrow_mut().autocenter_writes.push(enabled);
        Ok(())
    }

    fn ff_memory_load(&mut self) -> Result<u16, HwError> {
        self.state
            .borrow()
            .memory_load
            .clone()
            .map_err(HwError)
    }
}

fn rig() -> (SlottedFeedback<RigDevice>, Rc<RefCell<RigState>>) {
    let state = Rc::new(RefCell::new(RigState::new()));
    let device = RigDevice {
        state: Rc::clone(&state),
    };
    let feedback = SlottedFeedback::new(device, TimingCaps::default(), SupportMatrix::default());
    (feedback, state)
}

fn constant(level: i32) -> Effect {
    Effect::new(ForceKind::Constant { level }, Direction::North, 1_000_000)
}

#[test]
fn handle_is_stable_across_repeated_uploads() {
    let (mut ff, state) = rig();
    let effect = constant(4_000);

    let first = ff.upload(EffectId(7), &effect).unwrap();
    for _ in 0..4 {
        assert_eq!(ff.upload(EffectId(7), &effect).unwrap(), first);
    }

    let state = state.borrow();
    assert_eq!(state.slots.len(), 1, "re-uploads must not create new slots");
    let stats = state.slots[0].borrow();
    assert_eq!(stats.started, 1);
    assert_eq!(stats.updates, 4);
}

#[test]
fn distinct_ids_realize_distinct_slots() {
    let (mut ff, state) = rig();

    let a = ff.upload(EffectId(1), &constant(1_000)).unwrap();
    let b = ff.upload(EffectId(2), &constant(2_000)).unwrap();

    assert_ne!(a, b);
    assert_eq!(state.borrow().slots.len(), 2);
    assert_eq!(ff.live_effects(), 2);
}

#[test]
fn remove_then_upload_assigns_a_fresh_handle() {
    let (mut ff, state) = rig();

    let first = ff.upload(EffectId(1), &constant(1_000)).unwrap();
    ff.remove(EffectId(1));

    {
        let state = state.borrow();
        let stats = state.slots[0].borrow();
        assert_eq!(stats.stopped, 1);
        assert_eq!(stats.unloaded, 1);
        assert_eq!(stats.released, 1);
    }
    assert_eq!(ff.live_effects(), 0);

    let second = ff.upload(EffectId(1), &constant(1_000)).unwrap();
    assert_ne!(second, first);
    assert_eq!(state.borrow().slots.len(), 2);
}

#[test]
fn failed_unload_retains_the_slot_for_retry() {
    let (mut ff, state) = rig();

    ff.upload(EffectId(1), &constant(1_000)).unwrap();
    state.borrow().slots[0].borrow_mut().fail_unload = true;

    ff.remove(EffectId(1));
    {
        let state = state.borrow();
        let stats = state.slots[0].borrow();
        assert_eq!(stats.stopped, 1);
        assert_eq!(stats.unload_attempts, 1);
        assert_eq!(stats.released, 0, "failed unload must not release");
    }
    assert_eq!(ff.live_effects(), 1);

    // An upload in the meantime updates the retained slot instead of
    // creating a duplicate.
    ff.upload(EffectId(1), &constant(2_000)).unwrap();
    {
        let state = state.borrow();
        assert_eq!(state.slots.len(), 1);
        assert_eq!(state.slots[0].borrow().updates, 1);
    }

    // Once the device lets go, removal succeeds.
    state.borrow().slots[0].borrow_mut().fail_unload = false;
    ff.remove(EffectId(1));
    assert_eq!(ff.live_effects(), 0);
    assert_eq!(state.borrow().slots[0].borrow().released, 1);
}

#[test]
fn teardown_releases_every_slot_even_when_an_unload_fails() {
    let (ff, state) = {
        let (mut ff, state) = rig();
        ff.upload(EffectId(1), &constant(1_000)).unwrap();
        ff.upload(EffectId(2), &constant(2_000)).unwrap();
        state.borrow().slots[0].borrow_mut().fail_unload = true;
        (ff, state)
    };

    drop(ff);

    let state = state.borrow();
    assert_eq!(state.slots.len(), 2);
    for slot in &state.slots {
        let stats = slot.borrow();
        assert_eq!(stats.stopped, 1);
        assert_eq!(stats.unload_attempts, 1);
        assert_eq!(stats.released, 1);
    }
}

#[test]
fn exhausted_slots_report_device_full_and_burn_the_handle() {
    let (mut ff, state) = rig();

    state.borrow_mut().fail_create_full = true;
    assert_eq!(
        ff.upload(EffectId(1), &constant(1_000)).unwrap_err(),
        FeedbackError::DeviceFull
    );
    assert_eq!(ff.live_effects(), 0);

    // The failed attempt consumed a sequence number but bound nothing.
    state.borrow_mut().fail_create_full = false;
    let handle = ff.upload(EffectId(1), &constant(1_000)).unwrap();
    assert_eq!(handle, Some(EffectHandle(1)));
}

#[test]
fn rejected_update_reports_invalid_parameter() {
    let (mut ff, state) = rig();

    ff.upload(EffectId(1), &constant(1_000)).unwrap();
    state.borrow().slots[0].borrow_mut().fail_update = true;

    assert_eq!(
        ff.upload(EffectId(1), &constant(2_000)).unwrap_err(),
        FeedbackError::InvalidParameter
    );
}

#[test]
fn custom_force_creates_nothing() {
    let (mut ff, state) = rig();
    let effect = Effect::new(
        ForceKind::Custom {
            channel_count: 1,
            sample_period_us: 1_000,
            samples: vec![0, 100, 0, -100],
        },
        Direction::North,
        0,
    );

    assert_eq!(
        ff.upload(EffectId(1), &effect).unwrap_err(),
        FeedbackError::NotImplemented
    );
    assert!(state.borrow().slots.is_empty());
    assert_eq!(ff.live_effects(), 0);
}

#[test]
fn unrecognized_waveform_is_a_silent_no_op() {
    let (mut ff, state) = rig();
    let effect = Effect::new(
        ForceKind::Periodic {
            waveform: Waveform::Spring,
            magnitude: 100,
            offset: 0,
            phase: 0,
            period_us: 1_000,
        },
        Direction::North,
        0,
    );

    // Documented non-error: accepted, not realized.
    assert_eq!(ff.upload(EffectId(1), &effect).unwrap(), None);
    assert!(state.borrow().slots.is_empty());
}

#[test]
fn master_gain_maps_linearly_and_saturates() {
    let (mut ff, state) = rig();

    ff.set_master_gain(-1.0);
    ff.set_master_gain(0.5);
    ff.set_master_gain(2.0);

    assert_eq!(state.borrow().gain_writes, vec![0, 5_000, 10_000]);
}

#[test]
fn autocenter_forwards_the_switch() {
    let (mut ff, state) = rig();

    ff.set_autocenter(true);
    ff.set_autocenter(false);

    assert_eq!(state.borrow().autocenter_writes, vec![true, false]);
}

#[test]
fn memory_load_passes_through_and_wraps_failures() {
    let (mut ff, state) = rig();

    state.borrow_mut().memory_load = Ok(42);
    assert_eq!(ff.memory_load().unwrap(), 42);

    state.borrow_mut().memory_load =
        Err("device is not acquired in exclusive mode".to_string());
    match ff.memory_load().unwrap_err() {
        FeedbackError::General(message) => assert!(message.contains("exclusive")),
        other => panic!("expected General, got {other:?}"),
    }
}

#[test]
fn axis_count_and_timing_come_from_discovery() {
    let mut builder = SupportMatrixBuilder::new();
    builder.record_axis();
    builder.record_axis();

    let state = Rc::new(RefCell::new(RigState::new()));
    let device = RigDevice {
        state: Rc::clone(&state),
    };
    let timing = TimingCaps {
        sample_period_us: 1_000,
        min_time_resolution_us: 250,
    };
    let ff = SlottedFeedback::new(device, timing, builder.build());

    assert_eq!(ff.ff_axis_count(), 2);
    assert_eq!(ff.timing(), timing);
}
