//! Surface roughness of common plant plumbing materials.

use aq_core::units::{Length, mm};

#[inline]
pub fn pvc_pipe_roughness() -> Length {
    mm(0.12)
}

#[inline]
pub fn concrete_pipe_roughness() -> Length {
    mm(2.0)
}
