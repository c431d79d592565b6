//! TOML value helpers (handle integer/float coercion)

/// Read a float, accepting TOML integers as well
pub fn toml_f32(v: &toml::Value, default: f32) -> f32 {
    v.as_float()
        .map(|f| f as f32)
        .or_else(|| v.as_integer().map(|i| i as f32))
        .unwrap_or(default)
}

/// Read a non-negative integer, clamping negatives to zero
pub fn toml_usize(v: &toml::Value, default: usize) -> usize {
    v.as_integer()
        .map(|i| i.max(0) as usize)
        .unwrap_or(default)
}

pub fn toml_vec3(v: &toml::Value, default: [f32; 3]) -> [f32; 3] {
    if let Some(arr) = v.as_array() {
        if arr.len() >= 3 {
            return [
                toml_f32(&arr[0], default[0]),
                toml_f32(&arr[1], default[1]),
                toml_f32(&arr[2], default[2]),
            ];
        }
    }
    default
}
