use crate::error::{PipelineError, PipelineResult};
use crate::pipeline::Pipeline;

/// Builds pipelines, rejecting an absent subject.
#[derive(Debug, Clone, Copy, Default)]
pub struct PipelineFactory;

impl PipelineFactory {
    pub fn new() -> Self {
        Self
    }

    pub fn create_for<'a, T: ?Sized>(
        &self,
        subject: Option<&'a mut T>,
    ) -> PipelineResult<Pipeline<'a, T>> {
        match subject {
            Some(subject) => Ok(Pipeline::new(subject)),
            None => Err(PipelineError::InvalidSubject {
                message: "Parameter subject is required.".to_string(),
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::PipelineFactory;
    use crate::error::PipelineError;

    #[test]
    fn create_for_without_subject_fails() {
        let err = PipelineFactory::new()
            .create_for::<String>(None)
            .err()
            .expect("absent subject");
        assert!(matches!(
            err,
            PipelineError::InvalidSubject { ref message } if message == "Parameter subject is required."
        ));
        assert_eq!(err.to_string(), "invalid subject: Parameter subject is required.");
        assert_eq!(err.exit_code(), 1);
    }

    #[test]
    fn create_for_binds_subject() {
        let mut subject = String::from("x");
        let pipeline = PipelineFactory::new()
            .create_for(Some(&mut subject))
            .expect("pipeline");
        assert!(pipeline.is_empty());
    }
}
