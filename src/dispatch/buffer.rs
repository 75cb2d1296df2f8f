use crate::error::RenderError;

#[derive(Debug)]
pub struct TransportBuffer {
    data: Vec<f32>,
    capacity: usize,
}

impl TransportBuffer {
    pub fn with_capacity(capacity: usize) -> Result<Self, RenderError> {
        let mut data = Vec::new();
        data.try_reserve_exact(capacity)
            .map_err(|_| RenderError::BufferAllocation { len: capacity })?;
        Ok(TransportBuffer { data, capacity })
    }

    // full length from the start, every float zero.
    pub fn zeroed(len: usize) -> Result<Self, RenderError> {
        let mut buffer = TransportBuffer::with_capacity(len)?;
        buffer.data.resize(len, 0.0);
        Ok(buffer)
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn len(&self) -> usize {
        self.data.len()
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    // replaces the contents. never grows past the fixed capacity.
    pub fn write(&mut self, payload: &[f32]) -> Result<(), RenderError> {
        if payload.len() > self.capacity {
            return Err(RenderError::PayloadTooLarge {
                len: payload.len(),
                capacity: self.capacity,
            });
        }
        self.data.clear();
        self.data.extend_from_slice(payload);
        Ok(())
    }

    pub fn as_slice(&self) -> &[f32] {
        &self.data
    }

    pub fn as_mut_slice(&mut self) -> &mut [f32] {
        &mut self.data
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn test_write_within_capacity() {
        let mut buffer = TransportBuffer::with_capacity(4).unwrap();
        assert!(buffer.is_empty());
        buffer.write(&[1.0, 2.0, 3.0]).unwrap();
        assert_eq!(buffer.as_slice(), &[1.0, 2.0, 3.0]);
        buffer.write(&[4.0]).unwrap();
        assert_eq!(buffer.as_slice(), &[4.0]);
        assert_eq!(buffer.capacity(), 4);
    }

    #[test]
    fn test_oversized_payload_is_rejected_and_keeps_old_contents() {
        let mut buffer = TransportBuffer::with_capacity(2).unwrap();
        buffer.write(&[1.0]).unwrap();
        match buffer.write(&[0.0; 3]) {
            Err(RenderError::PayloadTooLarge { len: 3, capacity: 2 }) => {}
            other => panic!("unexpected {:?}", other),
        }
        assert_eq!(buffer.as_slice(), &[1.0]);
    }

    #[test]
    fn test_absurd_allocation_fails_cleanly() {
        assert!(matches!(
            TransportBuffer::with_capacity(usize::MAX / 2),
            Err(RenderError::BufferAllocation { .. })
        ));
    }

    #[test]
    fn test_zeroed() {
        let buffer = TransportBuffer::zeroed(6).unwrap();
        assert_eq!(buffer.len(), 6);
        assert!(buffer.as_slice().iter().all(|v| *v == 0.0));
    }
}
