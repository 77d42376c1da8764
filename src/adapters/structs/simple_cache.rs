use std::marker::PhantomData;
use std::sync::Arc;
use crate::cache::structs::variable_frontend::VariableFrontend;

#[derive(Debug)]
pub struct SimpleCache<T> {
    pub(crate) frontend: Arc<VariableFrontend>,
    pub(crate) value_type: PhantomData<fn() -> T>,
}
