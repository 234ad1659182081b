//! Scene rendering - skeleton, feedback bar, milestone flash and particles

use super::state::{GPU_STATE, MAX_VERTICES};
use super::shapes::VertexBatch;
use crate::bridge;
use crate::trainer::{FeedbackCode, FrameReport};

/// Colors for different visualization elements
mod colors {
    /// Joints above the visibility threshold
    pub const JOINT_VISIBLE: [f32; 4] = [0.96, 0.46, 0.26, 1.0];
    /// Joints the gate would reject
    pub const JOINT_OCCLUDED: [f32; 4] = [0.5, 0.5, 0.5, 0.6];
    /// Skeleton lines
    pub const BONE: [f32; 4] = [0.96, 0.26, 0.9, 0.8];
    /// Skeleton lines while a form correction is shown
    pub const BONE_CORRECTION: [f32; 4] = [1.0, 0.2, 0.2, 0.9];
    /// Status box behind the rep counter
    pub const STATUS_BOX: [f32; 4] = [0.196, 0.196, 0.196, 1.0];
    /// Milestone flash band
    pub const MILESTONE: [f32; 4] = [1.0, 1.0, 0.0, 0.35];
    /// Background
    pub const BACKGROUND: wgpu::Color = wgpu::Color {
        r: 0.102, g: 0.102, b: 0.180, a: 1.0
    };
}

/// Header height as a fraction of the frame (73px of 480 in the reference layout)
const HEADER_HEIGHT: f32 = 73.0 / 480.0;

/// Status box width as a fraction of the frame (250px of 640)
const STATUS_BOX_WIDTH: f32 = 250.0 / 640.0;

/// Convert normalized coordinates (0-1) to clip space (-1 to 1), flip Y
fn to_clip_space(x: f32, y: f32) -> (f32, f32) {
    (x * 2.0 - 1.0, -(y * 2.0 - 1.0))
}

/// Skeleton lines and joint dots, bones tinted while a correction is shown
fn add_skeleton(
    batch: &mut VertexBatch,
    landmarks: &[bridge::Landmark; 33],
    feedback: Option<FeedbackCode>,
    visibility_threshold: f32,
) {
    let bone_color = match feedback {
        Some(code) if code.is_correction() => colors::BONE_CORRECTION,
        _ => colors::BONE,
    };

    for &(start_idx, end_idx) in bridge::SQUAT_SKELETON.iter() {
        let start = landmarks[start_idx];
        let end = landmarks[end_idx];
        batch.line(
            to_clip_space(start.x, start.y),
            to_clip_space(end.x, end.y),
            0.006,
            bone_color,
        );
    }

    for &idx in bridge::KEY_LANDMARKS.iter() {
        let lm = landmarks[idx];
        let color = if lm.visibility > visibility_threshold {
            colors::JOINT_VISIBLE
        } else {
            colors::JOINT_OCCLUDED
        };
        batch.circle(to_clip_space(lm.x, lm.y), (0.012, 0.016), color, 12);
    }
}

/// Status box and feedback bar across the top of the frame
fn add_header(batch: &mut VertexBatch, report: &FrameReport) {
    let (left, top) = to_clip_space(0.0, 0.0);
    let (split, bottom) = to_clip_space(STATUS_BOX_WIDTH, HEADER_HEIGHT);
    let (right, _) = to_clip_space(1.0, 0.0);

    batch.rect((left, top), (split, bottom), colors::STATUS_BOX);
    batch.rect((split, top), (right, bottom), report.feedback.color());
}

/// Translucent band behind the milestone message
fn add_milestone_flash(batch: &mut VertexBatch) {
    let (left, top) = to_clip_space(0.0, 0.4);
    let (right, bottom) = to_clip_space(1.0, 0.6);
    batch.rect((left, top), (right, bottom), colors::MILESTONE);
}

/// Particles live in frame pixels; radii are scaled per axis to stay round
fn add_particles(batch: &mut VertexBatch, frame_size: (f32, f32)) {
    let (width, height) = frame_size;
    bridge::with_session(|session| {
        for particle in session.particles().particles() {
            let center = to_clip_space(particle.position.0 / width, particle.position.1 / height);
            let radius = (particle.radius * 2.0 / width, particle.radius * 2.0 / height);
            batch.circle(center, radius, particle.color, 10);
        }
    });
}

/// Render one frame from the latest landmarks and session report
pub fn render_frame() {
    GPU_STATE.with(|state_cell| {
        let mut state_ref = state_cell.borrow_mut();
        let state = match state_ref.as_mut() {
            Some(s) => s,
            None => return,
        };

        let (frame_size, extent, visibility_threshold) = bridge::with_session(|session| {
            let config = session.config();
            (
                (config.frame_width, config.frame_height),
                config.frame_extent(),
                config.visibility_threshold,
            )
        });
        state.fit_to_frame(extent);
        let report = bridge::with_last_report(|report| report.clone());

        let mut batch = VertexBatch::with_capacity(MAX_VERTICES);

        if let Some(landmarks) = bridge::get_all_landmarks() {
            let feedback = report.as_ref().map(|r| r.feedback);
            add_skeleton(&mut batch, &landmarks, feedback, visibility_threshold);
        }
        if let Some(report) = &report {
            add_header(&mut batch, report);
            if report.milestone_message.is_some() {
                add_milestone_flash(&mut batch);
            }
        }
        add_particles(&mut batch, frame_size);

        // Get surface and render
        let output = match state.surface.get_current_texture() {
            Ok(t) => t,
            Err(_) => return,
        };

        let view = output.texture.create_view(&wgpu::TextureViewDescriptor::default());
        let mut encoder = state.device.create_command_encoder(
            &wgpu::CommandEncoderDescriptor { label: Some("Render Encoder") }
        );

        if !batch.is_empty() {
            state.queue.write_buffer(
                &state.vertex_buffer,
                0,
                bytemuck::cast_slice(batch.as_slice()),
            );
        }

        {
            let mut pass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
                label: Some("Trainer Render Pass"),
                color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                    view: &view,
                    resolve_target: None,
                    ops: wgpu::Operations {
                        load: wgpu::LoadOp::Clear(colors::BACKGROUND),
                        store: wgpu::StoreOp::Store,
                    },
                })],
                depth_stencil_attachment: None,
                timestamp_writes: None,
                occlusion_query_set: None,
            });

            if !batch.is_empty() {
                pass.set_pipeline(&state.render_pipeline);
                pass.set_vertex_buffer(0, state.vertex_buffer.slice(..));
                pass.draw(0..batch.len() as u32, 0..1);
            }
        }

        state.queue.submit(std::iter::once(encoder.finish()));
        output.present();
    });
}
