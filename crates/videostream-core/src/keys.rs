//! Storage object path generation.
//!
//! Path format: `videos/{token}_{epoch_millis}.{extension}`, where the token
//! is 13 lowercase base-36 characters. The random token plus the submission
//! timestamp makes collisions with concurrent uploads implausible without
//! coordinating with the storage service.

use chrono::Utc;
use rand::Rng;

/// Bucket holding all uploaded video objects.
pub const VIDEOS_BUCKET: &str = "videos";

const TOKEN_LEN: usize = 13;
const BASE36: &[u8] = b"0123456789abcdefghijklmnopqrstuvwxyz";

fn random_token() -> String {
    let mut rng = rand::rng();
    (0..TOKEN_LEN)
        .map(|_| BASE36[rng.random_range(0..BASE36.len())] as char)
        .collect()
}

/// File extension (lowercased) of an original filename, empty when absent.
pub fn file_extension(filename: &str) -> &str {
    match filename.rsplit_once('.') {
        Some((stem, ext)) if !stem.is_empty() => ext,
        _ => "",
    }
}

/// Generate the storage path for a new upload from its original filename.
pub fn generate_object_path(original_filename: &str) -> String {
    let ext = file_extension(original_filename).to_lowercase();
    let millis = Utc::now().timestamp_millis();
    if ext.is_empty() {
        format!("{}/{}_{}", VIDEOS_BUCKET, random_token(), millis)
    } else {
        format!("{}/{}_{}.{}", VIDEOS_BUCKET, random_token(), millis, ext)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_object_path_shape() {
        let path = generate_object_path("clip.mp4");
        let name = path.strip_prefix("videos/").expect("bucket prefix");
        let (stem, ext) = name.rsplit_once('.').expect("extension");
        assert_eq!(ext, "mp4");
        let (token, millis) = stem.split_once('_').expect("token_millis");
        assert_eq!(token.len(), TOKEN_LEN);
        assert!(token
            .chars()
            .all(|c| c.is_ascii_lowercase() || c.is_ascii_digit()));
        assert!(millis.parse::<i64>().unwrap() > 0);
    }

    #[test]
    fn test_extension_is_lowercased() {
        let path = generate_object_path("MOVIE.MP4");
        assert!(path.ends_with(".mp4"));
    }

    #[test]
    fn test_paths_are_unique_across_calls() {
        let a = generate_object_path("clip.mp4");
        let b = generate_object_path("clip.mp4");
        assert_ne!(a, b);
    }

    #[test]
    fn test_file_extension_edge_cases() {
        assert_eq!(file_extension("clip.mp4"), "mp4");
        assert_eq!(file_extension("archive.tar.gz"), "gz");
        assert_eq!(file_extension("noext"), "");
        assert_eq!(file_extension(".hidden"), "");
    }

    #[test]
    fn test_missing_extension_omits_dot() {
        let path = generate_object_path("noext");
        assert!(!path.contains('.'));
    }
}
