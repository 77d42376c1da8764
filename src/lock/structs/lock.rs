use crate::lock::traits::lock_strategy::LockStrategy;

pub struct Lock {
    pub(crate) subject: String,
    pub(crate) exclusive: bool,
    pub(crate) strategy: Box<dyn LockStrategy>,
    pub(crate) released: bool,
}
