pub mod analyze_label_images;
pub mod score_extraction;
