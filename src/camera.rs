//! Camera setup and pointer picking.
//!
//! The board lies in the `z = 0` plane centred on the origin, one
//! [`CELL_WIDTH`] per cell, viewed head-on by a perspective camera. A pointer
//! position on the canvas is mapped back onto the board by unprojecting it at
//! the depth of the board's front face (`z = CELL_WIDTH / 2`).

use glam::{DMat4, DVec3, DVec4, Vec3};

use crate::constants::{CAMERA_POSITION, CAMERA_TARGET, CAMERA_UP, CELL_WIDTH, DEFAULT_CANVAS};
use crate::coord::Coord;

#[derive(Clone, Debug)]
pub struct Camera {
    eye: DVec3,
    target: DVec3,
    up: DVec3,
    canvas: (u32, u32),
    rows: usize,
    cols: usize,
    projection: DMat4,
    view: DMat4,
}

impl Camera {
    /// A camera framing a `rows x cols` board on the default canvas.
    pub fn new(rows: usize, cols: usize) -> Self {
        let mut cam = Self {
            eye: DVec3::from_array(CAMERA_POSITION.map(f64::from)),
            target: DVec3::from_array(CAMERA_TARGET.map(f64::from)),
            up: DVec3::from_array(CAMERA_UP.map(f64::from)),
            canvas: DEFAULT_CANVAS,
            rows,
            cols,
            projection: DMat4::IDENTITY,
            view: DMat4::IDENTITY,
        };
        cam.setup(rows, cols);
        cam
    }

    pub fn canvas(&self) -> (u32, u32) {
        self.canvas
    }

    /// Record a new canvas size and rebuild the matrices.
    ///
    /// Zero dimensions are bumped to one pixel.
    pub fn set_canvas_size(&mut self, width: u32, height: u32) {
        self.canvas = (width.max(1), height.max(1));
        self.setup(self.rows, self.cols);
    }

    /// Rebuild projection and view for a `rows x cols` board.
    ///
    /// The vertical field of view is chosen so the full board height fits with
    /// a one-cell margin.
    pub fn setup(&mut self, rows: usize, cols: usize) {
        self.rows = rows;
        self.cols = cols;
        let distance = (self.target - self.eye).length();
        let focus_height = 0.5 * rows as f64 * CELL_WIDTH;
        let calibrated = distance - CELL_WIDTH;
        let fov = 2.0 * (focus_height / calibrated).atan();
        let aspect = self.canvas.0 as f64 / self.canvas.1 as f64;
        self.projection = DMat4::perspective_rh_gl(fov, aspect, 1.0, distance + 100.0);
        self.view = DMat4::look_at_rh(self.eye, self.target, self.up);
    }

    /// World position of the board's lower-left corner.
    fn lower_left(&self) -> (f64, f64) {
        (
            -0.5 * self.cols as f64 * CELL_WIDTH,
            -0.5 * self.rows as f64 * CELL_WIDTH,
        )
    }

    /// Centre of a cell in world space.
    pub fn cell_center(&self, coord: Coord) -> Vec3 {
        let (llx, lly) = self.lower_left();
        Vec3::new(
            ((coord.col as f64 + 0.5) * CELL_WIDTH + llx) as f32,
            ((coord.row as f64 + 0.5) * CELL_WIDTH + lly) as f32,
            0.0,
        )
    }

    /// World point to window coordinates (origin bottom-left, depth in `[0, 1]`).
    pub fn project(&self, world: DVec3) -> DVec3 {
        let (w, h) = (self.canvas.0 as f64, self.canvas.1 as f64);
        let clip = self.projection * self.view * world.extend(1.0);
        let ndc = clip.truncate() / clip.w;
        let n = ndc * 0.5 + 0.5;
        DVec3::new(n.x * w, n.y * h, n.z)
    }

    /// Window coordinates back to a world point. Inverse of [`Camera::project`].
    pub fn unproject(&self, window: DVec3) -> DVec3 {
        let (w, h) = (self.canvas.0 as f64, self.canvas.1 as f64);
        let ndc = DVec4::new(window.x / w, window.y / h, window.z, 1.0) * 2.0 - 1.0;
        let inv = (self.projection * self.view).inverse();
        let obj = inv * ndc;
        obj.truncate() / obj.w
    }

    /// Board cell under a canvas pointer.
    ///
    /// `x` and `y` are canvas pixels with the origin at the top-left. Returns
    /// `None` when the pointer falls outside the board.
    pub fn coordinate_from_pointer(&self, x: f64, y: f64) -> Option<Coord> {
        let (llx, lly) = self.lower_left();
        let depth = self.project(DVec3::new(llx, lly, 0.5 * CELL_WIDTH)).z;
        let world = self.unproject(DVec3::new(x, self.canvas.1 as f64 - y, depth));

        if world.x.abs() > -llx || world.y.abs() > -lly {
            return None;
        }
        let col = ((world.x - llx) / CELL_WIDTH).floor();
        let row = ((world.y - lly) / CELL_WIDTH).floor();
        if col < 0.0 || row < 0.0 {
            return None;
        }
        let coord = Coord::new(col as usize, row as usize);
        coord.in_bounds(self.rows, self.cols).then_some(coord)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Canvas pointer that lands on the front face above a cell's centre.
    fn pointer_for(cam: &Camera, coord: Coord) -> (f64, f64) {
        let c = cam.cell_center(coord);
        let win = cam.project(DVec3::new(c.x as f64, c.y as f64, 0.5 * CELL_WIDTH));
        (win.x, cam.canvas().1 as f64 - win.y)
    }

    #[test]
    fn test_every_cell_is_pickable() {
        for (rows, cols) in [(8, 6), (6, 6), (10, 10), (6, 10)] {
            let cam = Camera::new(rows, cols);
            for row in 0..rows {
                for col in 0..cols {
                    let coord = Coord::new(col, row);
                    let (x, y) = pointer_for(&cam, coord);
                    assert_eq!(cam.coordinate_from_pointer(x, y), Some(coord), "{rows}x{cols}");
                }
            }
        }
    }

    #[test]
    fn test_canvas_corner_is_off_board() {
        let cam = Camera::new(8, 6);
        assert_eq!(cam.coordinate_from_pointer(0.0, 0.0), None);
        assert_eq!(cam.coordinate_from_pointer(509.0, 679.0), None);
    }

    #[test]
    fn test_screen_y_is_flipped() {
        let cam = Camera::new(8, 6);
        // screen y grows downward, board rows grow upward
        let (x, y_top) = pointer_for(&cam, Coord::new(0, 7));
        let (_, y_bottom) = pointer_for(&cam, Coord::new(0, 0));
        assert!(y_top < y_bottom);
        assert!(x > 0.0);
    }

    #[test]
    fn test_project_unproject_roundtrip() {
        let cam = Camera::new(8, 6);
        let p = DVec3::new(12.5, -30.0, 10.0);
        let back = cam.unproject(cam.project(p));
        assert!((back - p).length() < 1e-6);
    }

    #[test]
    fn test_resize_keeps_picking_consistent() {
        let mut cam = Camera::new(8, 6);
        cam.set_canvas_size(800, 600);
        let coord = Coord::new(4, 2);
        let (x, y) = pointer_for(&cam, coord);
        assert_eq!(cam.coordinate_from_pointer(x, y), Some(coord));
    }

    #[test]
    fn test_cell_center() {
        let cam = Camera::new(8, 6);
        assert_eq!(cam.cell_center(Coord::new(0, 0)), Vec3::new(-50.0, -70.0, 0.0));
        assert_eq!(cam.cell_center(Coord::new(5, 7)), Vec3::new(50.0, 70.0, 0.0));
    }
}
