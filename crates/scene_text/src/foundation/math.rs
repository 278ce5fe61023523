//! Math utilities and types
//!
//! Provides the math types used by the glyph pipeline: positions and scales
//! for glyph instances, RGBA colors, and homogeneous 2D matrices for
//! transforming texture coordinates.

pub use nalgebra::{Matrix3, Vector2, Vector3, Vector4};

/// 2D vector type
pub type Vec2 = Vector2<f32>;

/// 3D vector type
pub type Vec3 = Vector3<f32>;

/// 4D vector type
pub type Vec4 = Vector4<f32>;

/// 3x3 matrix type (homogeneous 2D transform)
pub type Mat3 = Matrix3<f32>;

/// 2D point type
pub type Point2 = nalgebra::Point2<f32>;

/// Normalized RGBA color
pub type Rgba = Vec4;

/// Opaque white, the fallback color for anything that fails to resolve
pub const WHITE: [f32; 4] = [1.0, 1.0, 1.0, 1.0];

/// Build an [`Rgba`] from its four components
pub fn rgba(r: f32, g: f32, b: f32, a: f32) -> Rgba {
    Rgba::new(r, g, b, a)
}

/// UV-space transforms
///
/// Texture coordinates are treated as 2D points; each transform is a 3x3
/// homogeneous matrix applied to every vertex UV of a mesh.
pub mod uv {
    use super::{Mat3, Point2, Vec2};

    /// Non-uniform scale about the UV origin
    pub fn scale(su: f32, sv: f32) -> Mat3 {
        Mat3::new_nonuniform_scaling(&Vec2::new(su, sv))
    }

    /// Translation in UV space
    pub fn translation(du: f32, dv: f32) -> Mat3 {
        Mat3::new_translation(&Vec2::new(du, dv))
    }

    /// Apply a transform to a single texture coordinate
    pub fn apply(matrix: &Mat3, tex_coord: [f32; 2]) -> [f32; 2] {
        let p = matrix.transform_point(&Point2::new(tex_coord[0], tex_coord[1]));
        [p.x, p.y]
    }

    /// Reduce a coordinate into `[0, 1)` as repeat texture addressing does
    pub fn wrap(value: f32) -> f32 {
        value.rem_euclid(1.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_uv_scale_then_translate() {
        let m = uv::translation(0.25, 0.5) * uv::scale(0.5, 0.5);
        let out = uv::apply(&m, [1.0, 1.0]);
        assert_relative_eq!(out[0], 0.75);
        assert_relative_eq!(out[1], 1.0);
    }

    #[test]
    fn test_uv_wrap() {
        assert_relative_eq!(uv::wrap(15.875), 0.875);
        assert_relative_eq!(uv::wrap(-0.25), 0.75);
        assert_relative_eq!(uv::wrap(0.0), 0.0);
    }

    #[test]
    fn test_rgba_components() {
        let c = rgba(0.1, 0.2, 0.3, 0.4);
        assert_relative_eq!(c.w, 0.4);
        assert_eq!(Rgba::from(WHITE), rgba(1.0, 1.0, 1.0, 1.0));
    }
}
