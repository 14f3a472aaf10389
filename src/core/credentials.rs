use rand::Rng;
use std::sync::atomic::{AtomicUsize, Ordering};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum CredentialError {
    #[error("credential pool must contain at least one key")]
    Empty,
}

/// Chooses an index into the credential pool for each outbound attempt
pub trait KeyPicker: Send + Sync {
    /// Return an index in `0..len`. `len` is never zero.
    fn pick(&self, len: usize) -> usize;
}

/// Uniform random choice, one draw per attempt
#[derive(Debug, Default, Clone, Copy)]
pub struct RandomPicker;

impl KeyPicker for RandomPicker {
    fn pick(&self, len: usize) -> usize {
        rand::thread_rng().gen_range(0..len)
    }
}

/// Replays a fixed sequence of indices, wrapping around at the end
///
/// Used to make credential selection deterministic in tests.
#[derive(Debug)]
pub struct SequencePicker {
    indices: Vec<usize>,
    cursor: AtomicUsize,
}

impl SequencePicker {
    pub fn new(indices: Vec<usize>) -> Self {
        Self {
            indices,
            cursor: AtomicUsize::new(0),
        }
    }
}

impl KeyPicker for SequencePicker {
    fn pick(&self, len: usize) -> usize {
        if self.indices.is_empty() {
            return 0;
        }
        let n = self.cursor.fetch_add(1, Ordering::Relaxed);
        self.indices[n % self.indices.len()] % len
    }
}

/// Immutable set of interchangeable access tokens
#[derive(Clone)]
pub struct CredentialPool {
    keys: Vec<String>,
}

impl CredentialPool {
    pub fn new(keys: Vec<String>) -> Result<Self, CredentialError> {
        let keys: Vec<String> = keys
            .into_iter()
            .map(|k| k.trim().to_string())
            .filter(|k| !k.is_empty())
            .collect();

        if keys.is_empty() {
            return Err(CredentialError::Empty);
        }

        Ok(Self { keys })
    }

    pub fn len(&self) -> usize {
        self.keys.len()
    }

    pub fn is_empty(&self) -> bool {
        self.keys.is_empty()
    }

    /// Draw one key through the given picker
    pub fn draw(&self, picker: &dyn KeyPicker) -> &str {
        let idx = picker.pick(self.keys.len()).min(self.keys.len() - 1);
        &self.keys[idx]
    }
}

// Keys never show up in logs.
impl std::fmt::Debug for CredentialPool {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CredentialPool")
            .field("keys", &self.keys.len())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_pool_rejected() {
        assert!(CredentialPool::new(vec![]).is_err());
        assert!(CredentialPool::new(vec!["  ".to_string()]).is_err());
    }

    #[test]
    fn test_sequence_picker_wraps() {
        let pool = CredentialPool::new(vec!["a".into(), "b".into(), "c".into()]).unwrap();
        let picker = SequencePicker::new(vec![2, 0]);

        assert_eq!(pool.draw(&picker), "c");
        assert_eq!(pool.draw(&picker), "a");
        assert_eq!(pool.draw(&picker), "c");
    }

    #[test]
    fn test_random_picker_stays_in_bounds() {
        let pool = CredentialPool::new(vec!["a".into(), "b".into()]).unwrap();
        for _ in 0..100 {
            let key = pool.draw(&RandomPicker);
            assert!(key == "a" || key == "b");
        }
    }

    #[test]
    fn test_debug_hides_keys() {
        let pool = CredentialPool::new(vec!["secret-key".into()]).unwrap();
        assert!(!format!("{:?}", pool).contains("secret-key"));
    }
}
