//! Built-in demonstration records.
//!
//! Used to exercise the workspace without a running service.

use serde_json::json;

use super::image::ImageRecord;

fn sample(
    id: i64,
    filename: &str,
    (focus, exposure, quality): (f64, f64, f64),
    face_count: u32,
    eyes_open: bool,
) -> ImageRecord {
    let mut record = ImageRecord::new(id, filename)
        .with_scores(focus, exposure, quality)
        .with_faces(face_count, eyes_open);
    record.analysis_data = json!({
        "focus_score": focus,
        "exposure_analysis": { "exposure_score": exposure },
        "face_analysis": { "face_count": face_count, "faces_detected": face_count > 0 },
        "image_dimensions": { "width": 1920, "height": 1080 }
    });
    record
}

/// Three unjudged records: two portraits and a soft landscape.
pub fn sample_images() -> Vec<ImageRecord> {
    vec![
        sample(1, "sample_portrait_1.jpg", (85.0, 92.0, 88.0), 1, true),
        sample(2, "sample_landscape_1.jpg", (45.0, 78.0, 62.0), 0, false),
        sample(3, "sample_portrait_2.jpg", (92.0, 88.0, 90.0), 2, true),
    ]
}
