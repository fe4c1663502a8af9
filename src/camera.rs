use glam::{Mat4, Vec3, Vec4};

/// Perspective camera that maps screen pixels (origin bottom-left) plus a
/// view depth to world positions.
#[derive(Debug, Clone, PartialEq)]
pub struct ScreenCamera {
    pub position: Vec3,
    pub target: Vec3,
    pub up: Vec3,
    pub fov: f32,
    pub near: f32,
    pub far: f32,
    /// Viewport size in pixels.
    pub viewport: (f32, f32),
}

impl Default for ScreenCamera {
    fn default() -> Self {
        Self {
            position: Vec3::new(0.0, 1.0, 10.0),
            target: Vec3::new(0.0, 1.0, 0.0),
            up: Vec3::Y,
            fov: 60.0_f32.to_radians(),
            near: 0.3,
            far: 1000.0,
            viewport: (640.0, 480.0),
        }
    }
}

impl ScreenCamera {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_viewport(width: f32, height: f32) -> Self {
        Self {
            viewport: (width, height),
            ..Self::default()
        }
    }

    pub fn aspect(&self) -> f32 {
        self.viewport.0 / self.viewport.1
    }

    pub fn view_matrix(&self) -> Mat4 {
        Mat4::look_at_rh(self.position, self.target, self.up)
    }

    pub fn projection_matrix(&self) -> Mat4 {
        Mat4::perspective_rh(self.fov, self.aspect(), self.near, self.far)
    }

    pub fn view_projection(&self) -> Mat4 {
        self.projection_matrix() * self.view_matrix()
    }

    pub fn forward(&self) -> Vec3 {
        (self.target - self.position).normalize()
    }

    pub fn screen_to_ndc(&self, x: f32, y: f32) -> (f32, f32) {
        (2.0 * x / self.viewport.0 - 1.0, 2.0 * y / self.viewport.1 - 1.0)
    }

    pub fn screen_to_ray(&self, ndc_x: f32, ndc_y: f32) -> (Vec3, Vec3) {
        let inv_view_proj = self.view_projection().inverse();

        let near_point = inv_view_proj * Vec4::new(ndc_x, ndc_y, 0.0, 1.0);
        let far_point = inv_view_proj * Vec4::new(ndc_x, ndc_y, 1.0, 1.0);

        let near = near_point.truncate() / near_point.w;
        let far = far_point.truncate() / far_point.w;

        let direction = (far - near).normalize();
        (near, direction)
    }

    /// `screen.z` is the distance in front of the camera, measured along the
    /// view direction rather than along the pixel's ray.
    pub fn screen_to_world(&self, screen: Vec3) -> Vec3 {
        let (ndc_x, ndc_y) = self.screen_to_ndc(screen.x, screen.y);
        let (near, _) = self.screen_to_ray(ndc_x, ndc_y);
        let direction = (near - self.position).normalize();
        let t = screen.z / direction.dot(self.forward());
        self.position + direction * t
    }

    /// Inverse of [`screen_to_world`](Self::screen_to_world).
    pub fn world_to_screen(&self, world: Vec3) -> Vec3 {
        let clip = self.view_projection() * world.extend(1.0);
        let ndc = clip.truncate() / clip.w;
        let depth = (world - self.position).dot(self.forward());
        Vec3::new(
            (ndc.x + 1.0) * 0.5 * self.viewport.0,
            (ndc.y + 1.0) * 0.5 * self.viewport.1,
            depth,
        )
    }
}
