pub mod still_image_source;
