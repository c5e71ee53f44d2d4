//! Interactive preview window.
//!
//! Triangles are flat shaded on the CPU and handed to egui as one coloured mesh,
//! sorted back to front so the translucent surface blends correctly.
//! Drag to orbit, scroll to zoom.

use crate::errors::BansheeError;
use crate::float_types::Real;
use crate::mesh::Mesh;
use crate::traits::CSGOps;
use nalgebra::{Point3, Rotation3, Vector3};
use std::fmt::Debug;

/// How the solid is drawn.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ViewStyle {
    /// RGB in `[0, 1]`.
    pub color: [Real; 3],
    /// `0` opaque, `1` invisible.
    pub transparency: Real,
}

struct Facet {
    points: [Point3<Real>; 3],
    normal: Vector3<Real>,
}

struct ViewerApp {
    facets: Vec<Facet>,
    center: Point3<Real>,
    radius: Real,
    style: ViewStyle,
    yaw: Real,
    pitch: Real,
    zoom: Real,
}

impl ViewerApp {
    fn new<S: Clone + Send + Sync + Debug>(mesh: &Mesh<S>, style: ViewStyle) -> Self {
        let bounds = mesh.bounding_box();
        let facets = mesh
            .polygons
            .iter()
            .flat_map(|poly| {
                let normal = poly.plane.normal();
                poly.triangulate().into_iter().map(move |tri| Facet {
                    points: tri.map(|v| v.pos),
                    normal,
                })
            })
            .collect();

        Self {
            facets,
            center: bounds.center(),
            radius: bounds.half_extents().norm().max(Real::EPSILON),
            style,
            yaw: 0.6,
            pitch: 0.3,
            zoom: 1.0,
        }
    }

    fn rotation(&self) -> Rotation3<Real> {
        Rotation3::from_axis_angle(&Vector3::x_axis(), self.pitch)
            * Rotation3::from_axis_angle(&Vector3::z_axis(), self.yaw)
    }

    /// Project, shade and depth-sort every facet into an egui mesh filling `rect`.
    fn shaded_mesh(&self, rect: egui::Rect) -> egui::Mesh {
        let rotation = self.rotation();
        let scale = 0.45 * rect.width().min(rect.height()) as Real / self.radius * self.zoom;
        let light = Vector3::new(-0.3, -1.0, -0.5).normalize();
        let alpha = ((1.0 - self.style.transparency) * 255.0).round() as u8;
        let [r, g, b] = self.style.color;

        // View space: x right, y into the screen, z down (head at the top)
        let mut projected: Vec<(Real, [egui::Pos2; 3], Real)> = self
            .facets
            .iter()
            .map(|facet| {
                let view = facet.points.map(|p| rotation * (p - self.center));
                let depth = view.iter().map(|v| v.y).sum::<Real>() / 3.0;
                let screen = view.map(|v| {
                    egui::pos2(
                        rect.center().x + (v.x * scale) as f32,
                        rect.center().y + (v.z * scale) as f32,
                    )
                });
                let lambert = (rotation * facet.normal).dot(&light).abs();
                (depth, screen, 0.25 + 0.75 * lambert)
            })
            .collect();
        projected.sort_by(|a, b| b.0.total_cmp(&a.0));

        let mut mesh = egui::Mesh::default();
        for (_, screen, intensity) in projected {
            let channel = |c: Real| (c * intensity * 255.0).clamp(0.0, 255.0) as u8;
            let color =
                egui::Color32::from_rgba_unmultiplied(channel(r), channel(g), channel(b), alpha);
            let base = mesh.vertices.len() as u32;
            for pos in screen {
                mesh.colored_vertex(pos, color);
            }
            mesh.add_triangle(base, base + 1, base + 2);
        }
        mesh
    }
}

impl eframe::App for ViewerApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        egui::CentralPanel::default()
            .frame(egui::Frame::none().fill(egui::Color32::from_gray(24)))
            .show(ctx, |ui| {
                let (response, painter) =
                    ui.allocate_painter(ui.available_size(), egui::Sense::drag());

                if response.dragged() {
                    let delta = response.drag_delta();
                    self.yaw += delta.x as Real * 0.01;
                    self.pitch = (self.pitch + delta.y as Real * 0.01).clamp(-1.5, 1.5);
                }
                let scroll = ui.input(|i| i.smooth_scroll_delta.y);
                if scroll != 0.0 {
                    self.zoom = (self.zoom * (1.0 + scroll as Real * 0.002)).clamp(0.1, 20.0);
                }

                painter.add(egui::Shape::mesh(self.shaded_mesh(response.rect)));
            });
    }
}

/// Open a window showing `mesh`; returns once the window is closed.
pub fn show<S: Clone + Send + Sync + Debug>(
    mesh: &Mesh<S>,
    title: &str,
    style: ViewStyle,
) -> Result<(), BansheeError> {
    let app = ViewerApp::new(mesh, style);
    tracing::info!(facets = app.facets.len(), "opening viewer");

    let native_options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([900.0, 900.0])
            .with_title(title),
        ..Default::default()
    };

    eframe::run_native(title, native_options, Box::new(|_cc| Ok(Box::new(app))))
        .map_err(|e| BansheeError::Viewer(e.to_string()))
}
