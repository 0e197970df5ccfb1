use cgmath::{perspective, Deg, Matrix4, Point3, SquareMatrix, Vector3};

#[rustfmt::skip]
pub const OPENGL_TO_WGPU_MATRIX: Matrix4<f32> = Matrix4::new(
    1.0, 0.0, 0.0, 0.0,
    0.0, 1.0, 0.0, 0.0,
    0.0, 0.0, 0.5, 0.5,
    0.0, 0.0, 0.0, 1.0,
);

/// Vertical field of view of the editor camera, in degrees
pub const DEFAULT_FOVY_DEGREES: f32 = 70.0;
pub const DEFAULT_ZNEAR: f32 = 0.01;
pub const DEFAULT_ZFAR: f32 = 10.0;
/// Distance from the origin along +Z at construction
pub const DEFAULT_DISTANCE: f32 = 1.0;

pub trait Camera {
    fn build_view_projection_matrix(&self) -> Matrix4<f32>;
}

#[repr(C)]
#[derive(Copy, Clone, bytemuck::Pod, bytemuck::Zeroable, Debug)]
pub struct CameraUniform {
    /// The eye position of the camera in homogenous coordinates.
    ///
    /// Homogenous coordinates are used to fullfill the 16 byte alignment requirement.
    pub view_position: [f32; 4],

    /// Contains the view projection matrix.
    pub view_proj: [[f32; 4]; 4],
}

impl Default for CameraUniform {
    fn default() -> Self {
        Self {
            view_position: [0.0; 4],
            view_proj: Matrix4::identity().into(),
        }
    }
}

/// Y-up perspective camera looking from `eye` towards `target`
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PerspectiveCamera {
    pub eye: Point3<f32>,
    pub target: Point3<f32>,
    pub up: Vector3<f32>,
    pub fovy: Deg<f32>,
    pub aspect: f32,
    pub znear: f32,
    pub zfar: f32,
}

impl PerspectiveCamera {
    /// Camera sitting on +Z at [`DEFAULT_DISTANCE`] looking at the origin
    pub fn new(aspect: f32) -> Self {
        Self {
            eye: Point3::new(0.0, 0.0, DEFAULT_DISTANCE),
            target: Point3::new(0.0, 0.0, 0.0),
            up: Vector3::unit_y(),
            fovy: Deg(DEFAULT_FOVY_DEGREES),
            aspect,
            znear: DEFAULT_ZNEAR,
            zfar: DEFAULT_ZFAR,
        }
    }

    /// Camera whose aspect matches a `width` x `height` pixel surface
    pub fn for_viewport(width: u32, height: u32) -> Self {
        Self::new(width as f32 / height.max(1) as f32)
    }

    pub fn uniform(&self) -> CameraUniform {
        CameraUniform {
            view_position: [self.eye.x, self.eye.y, self.eye.z, 1.0],
            view_proj: self.build_view_projection_matrix().into(),
        }
    }
}

impl Camera for PerspectiveCamera {
    fn build_view_projection_matrix(&self) -> Matrix4<f32> {
        let view = Matrix4::look_at_rh(self.eye, self.target, self.up);
        let proj =
            OPENGL_TO_WGPU_MATRIX * perspective(self.fovy, self.aspect, self.znear, self.zfar);
        proj * view
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use cgmath::Vector4;

    #[test]
    fn viewport_sets_aspect() {
        let camera = PerspectiveCamera::for_viewport(1200, 800);
        assert_eq!(camera.aspect, 1.5);
        assert_eq!(camera.fovy, Deg(70.0));
        assert_eq!(camera.eye, Point3::new(0.0, 0.0, 1.0));
    }

    #[test]
    fn origin_projects_to_screen_center() {
        let camera = PerspectiveCamera::new(1.0);
        let clip = camera.build_view_projection_matrix() * Vector4::new(0.0, 0.0, 0.0, 1.0);
        let ndc = clip.truncate() / clip.w;
        assert!(ndc.x.abs() < 1e-6);
        assert!(ndc.y.abs() < 1e-6);
        assert!(ndc.z > 0.0 && ndc.z < 1.0);
    }

    #[test]
    fn points_behind_far_plane_are_clipped() {
        let camera = PerspectiveCamera::new(1.0);
        let clip = camera.build_view_projection_matrix() * Vector4::new(0.0, 0.0, -20.0, 1.0);
        assert!(clip.z / clip.w > 1.0);
    }
}
