use super::{Channel, ChannelReader, SensorReadError};
use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Mutex;
use std::sync::atomic::{AtomicUsize, Ordering};

#[derive(Debug, Clone, Copy)]
pub(crate) enum MockFailure {
    NotFound,
    Malformed,
    Io,
}

/// In-memory ADC with per channel codes or injected failures.
#[derive(Debug, Default)]
pub(crate) struct MockChannelReader {
    codes: Mutex<HashMap<Channel, Result<i64, MockFailure>>>,
    reads: AtomicUsize,
}

impl MockChannelReader {
    pub(crate) fn with_codes(codes: &[(u8, i64)]) -> Self {
        let reader = Self::default();
        for (idx, code) in codes {
            reader.set_code(*idx, *code);
        }
        reader
    }

    pub(crate) fn set_code(&self, idx: u8, code: i64) {
        self.codes.lock().unwrap().insert(Channel::new(idx), Ok(code));
    }

    pub(crate) fn fail(&self, idx: u8, failure: MockFailure) {
        self.codes.lock().unwrap().insert(Channel::new(idx), Err(failure));
    }

    pub(crate) fn reads(&self) -> usize { self.reads.load(Ordering::SeqCst) }
}

#[async_trait]
impl ChannelReader for MockChannelReader {
    async fn read(&self, channel: Channel) -> Result<i64, SensorReadError> {
        self.reads.fetch_add(1, Ordering::SeqCst);
        let entry = self.codes.lock().unwrap().get(&channel).copied();
        match entry {
            Some(Ok(code)) => Ok(code),
            Some(Err(MockFailure::Malformed)) => {
                Err(SensorReadError::Malformed { channel, content: String::from("n/a") })
            }
            Some(Err(MockFailure::Io)) => {
                Err(SensorReadError::IOError { channel, reason: String::from("bus error") })
            }
            Some(Err(MockFailure::NotFound)) | None => {
                Err(SensorReadError::NotFound { channel, path: format!("mock/{channel}") })
            }
        }
    }
}
