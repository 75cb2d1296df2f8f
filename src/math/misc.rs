use super::Vec3;

// mirrors `v` about `n` and normalizes, i.e. `2 (v·n) n - v`.
// both arguments point away from the surface, so the result does too.
pub fn reflect(v: Vec3, n: Vec3) -> Vec3 {
    (n * (2.0 * (v * n)) - v).normalized()
}

// bends `v` through a surface with normal `n` and relative index `index`.
// returns None on total internal reflection.
pub fn refract(v: Vec3, n: Vec3, index: f32) -> Option<Vec3> {
    let mut cos_i = -(v * n).clamp(-1.0, 1.0);
    let (mut eta_i, mut eta_t) = (1.0, index);
    if cos_i < 0.0 {
        // leaving the medium
        cos_i = -cos_i;
        std::mem::swap(&mut eta_i, &mut eta_t);
    }
    let eta = eta_i / eta_t;
    let k = 1.0 - eta_i * eta_i * (1.0 - cos_i * cos_i);
    if k < 0.0 {
        None
    } else {
        Some(v * eta + n * (eta * cos_i - k.sqrt()))
    }
}
