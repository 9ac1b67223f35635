use crate::{
    config::Param,
    render::ForceArrow,
    simulation::Simulation,
};

#[unsafe(no_mangle)]
pub unsafe extern "C" fn Lab_Create(width: f32, height: f32) -> *mut Simulation {
    match Simulation::with_viewport(width, height) {
        Ok(sim) => Box::into_raw(Box::new(sim)),
        Err(err) => {
            log::error!("Lab_Create: {}", err);
            std::ptr::null_mut()
        }
    }
}

#[unsafe(no_mangle)]
pub unsafe extern "C" fn Lab_Destroy(handle: *mut Simulation) {
    if !handle.is_null() {
        unsafe { drop(Box::from_raw(handle)) };
    }
}

/// Returns 1 if the body moved this tick, 0 otherwise.
#[unsafe(no_mangle)]
pub unsafe extern "C" fn Lab_Step(handle: *mut Simulation) -> i32 {
    match unsafe { handle.as_mut() } {
        Some(sim) => sim.step().moved() as i32,
        None => 0,
    }
}

#[unsafe(no_mangle)]
pub unsafe extern "C" fn Lab_ApplyImpulse(handle: *mut Simulation) {
    if let Some(sim) = unsafe { handle.as_mut() } {
        sim.apply_impulse();
    }
}

#[unsafe(no_mangle)]
pub unsafe extern "C" fn Lab_Reset(handle: *mut Simulation) {
    if let Some(sim) = unsafe { handle.as_mut() } {
        sim.reset();
    }
}

/// Param codes: 0 mass, 1 gravity, 2 impulse magnitude, 3 impulse angle, 4 friction, 5 restitution.
/// Returns 0 on success, -1 for a null handle or unknown code.
#[unsafe(no_mangle)]
pub unsafe extern "C" fn Lab_Configure(handle: *mut Simulation, param: u32, value: f32) -> i32 {
    let Some(sim) = (unsafe { handle.as_mut() }) else {
        return -1;
    };
    match Param::try_from(param) {
        Ok(param) => {
            sim.configure(param, value);
            0
        }
        Err(err) => {
            log::error!("Lab_Configure: {}", err);
            -1
        }
    }
}

#[unsafe(no_mangle)]
pub unsafe extern "C" fn Lab_GetPosition(handle: *const Simulation, x: *mut f32, y: *mut f32) {
    if let Some(sim) = unsafe { handle.as_ref() } {
        unsafe { write_pair(sim.body.pos.x, sim.body.pos.y, x, y) };
    }
}

#[unsafe(no_mangle)]
pub unsafe extern "C" fn Lab_GetVelocity(handle: *const Simulation, x: *mut f32, y: *mut f32) {
    if let Some(sim) = unsafe { handle.as_ref() } {
        unsafe { write_pair(sim.body.vel.x, sim.body.vel.y, x, y) };
    }
}

#[unsafe(no_mangle)]
pub unsafe extern "C" fn Lab_IsActive(handle: *const Simulation) -> bool {
    unsafe { handle.as_ref() }.is_some_and(|sim| sim.active)
}

/// Writes the force arrow to `out` and returns 1 if it is visible, 0 otherwise.
#[unsafe(no_mangle)]
pub unsafe extern "C" fn Lab_GetArrow(handle: *const Simulation, out: *mut ForceArrow) -> i32 {
    let arrow = unsafe { handle.as_ref() }.and_then(|sim| sim.force_arrow());
    match (arrow, unsafe { out.as_mut() }) {
        (Some(arrow), Some(out)) => {
            *out = arrow;
            1
        }
        _ => 0,
    }
}

unsafe fn write_pair(a: f32, b: f32, out_a: *mut f32, out_b: *mut f32) {
    if let Some(out) = unsafe { out_a.as_mut() } {
        *out = a;
    }
    if let Some(out) = unsafe { out_b.as_mut() } {
        *out = b;
    }
}
