use glam::{EulerRot, Mat4, Vec3};

/// Transform component
///
/// Local spatial state of a node: position, Euler orientation, scale, a pivot
/// (`center`) that rotation and scale are applied about, and an immutable base
/// matrix captured at import time.
///
/// Orientation is a raw `Vec3` of radians in X, Y, Z order. It is never
/// normalized or converted to a stored quaternion, so multi-turn spins keep
/// accumulating (a reel rotated by `20π` reads back `20π`).
#[derive(Debug, Clone, PartialEq)]
pub struct Transform {
    pub position: Vec3,
    pub orientation: Vec3,
    pub scale: Vec3,
    pub center: Vec3,

    base: Mat4,
}

impl Transform {
    #[must_use]
    pub fn new() -> Self {
        Self::with_base(Mat4::IDENTITY)
    }

    /// Creates an identity transform on top of an import-time base matrix.
    #[must_use]
    pub fn with_base(base: Mat4) -> Self {
        Self {
            position: Vec3::ZERO,
            orientation: Vec3::ZERO,
            scale: Vec3::ONE,
            center: Vec3::ZERO,
            base,
        }
    }

    // ========================================================================
    // Additive updates
    // ========================================================================

    pub fn move_by(&mut self, offset: Vec3) {
        self.position += offset;
    }

    pub fn rotate(&mut self, rotation: Vec3) {
        self.orientation += rotation;
    }

    pub fn grow(&mut self, growth: Vec3) {
        self.scale += growth;
    }

    // ========================================================================
    // Matrices
    // ========================================================================

    #[inline]
    #[must_use]
    pub fn base(&self) -> &Mat4 {
        &self.base
    }

    /// Rotation matrix for the current orientation (X, then Y, then Z).
    #[inline]
    #[must_use]
    pub fn rotation_matrix(&self) -> Mat4 {
        Mat4::from_euler(
            EulerRot::XYZ,
            self.orientation.x,
            self.orientation.y,
            self.orientation.z,
        )
    }

    /// Local → parent matrix.
    ///
    /// `base × T(position + center) × R(orientation) × S(scale) × T(-center)`
    #[must_use]
    pub fn local_matrix(&self) -> Mat4 {
        self.base
            * Mat4::from_translation(self.position + self.center)
            * self.rotation_matrix()
            * Mat4::from_scale(self.scale)
            * Mat4::from_translation(-self.center)
    }

    /// Composes this transform under `parent_world`.
    #[inline]
    #[must_use]
    pub fn world_matrix(&self, parent_world: &Mat4) -> Mat4 {
        *parent_world * self.local_matrix()
    }
}

impl Default for Transform {
    fn default() -> Self {
        Self::new()
    }
}
