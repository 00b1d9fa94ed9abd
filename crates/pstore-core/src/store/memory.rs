//! In-process parameter store
//!
//! Holds parameters in a sorted map and mimics the remote service closely
//! enough for the synchronizer: paginated listings with continuation tokens,
//! the ten-name delete cap, create-without-overwrite conflicts. Every call is
//! counted, and failures can be injected per operation and name.

use std::collections::BTreeMap;
use std::ops::Bound;
use std::sync::{Mutex, MutexGuard, PoisonError};

use super::{
    DeleteOutcome, MAX_DELETE_BATCH, MAX_PAGE_SIZE, Page, ParameterStore, PathQuery, PutParameter,
    StoreError, StoreResult,
};
use crate::model::{Parameter, ParameterMetadata, StorageClass};

/// Key id reported for parameters encrypted under the default key
const DEFAULT_KEY_ALIAS: &str = "alias/aws/ssm";

/// Store operations, used to target injected failures.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operation {
    GetParameter,
    PutParameter,
    GetParametersByPath,
    DeleteParameters,
    DescribeParameters,
}

/// Number of calls received per operation.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CallCounts {
    pub get: usize,
    pub put: usize,
    pub path_pages: usize,
    /// Size of each delete batch, in call order
    pub delete_batches: Vec<usize>,
    pub describe_pages: usize,
}

#[derive(Debug, Clone)]
struct StoredParameter {
    value: String,
    storage: StorageClass,
    version: i64,
}

#[derive(Debug)]
struct InjectedFailure {
    operation: Operation,
    name: Option<String>,
    error: StoreError,
}

#[derive(Debug, Default)]
struct State {
    parameters: BTreeMap<String, StoredParameter>,
    calls: CallCounts,
    failures: Vec<InjectedFailure>,
}

impl State {
    fn check_failure(&self, operation: Operation, names: &[&str]) -> StoreResult<()> {
        let hit = self.failures.iter().find(|f| {
            f.operation == operation
                && f.name
                    .as_deref()
                    .is_none_or(|target| names.contains(&target))
        });
        match hit {
            Some(failure) => Err(failure.error.clone()),
            None => Ok(()),
        }
    }

    fn after(&self, token: Option<&str>) -> impl Iterator<Item = (&String, &StoredParameter)> {
        let lower = match token {
            Some(token) => Bound::Excluded(token),
            None => Bound::Unbounded,
        };
        self.parameters.range::<str, _>((lower, Bound::Unbounded))
    }
}

/// Parameter store kept entirely in memory.
#[derive(Debug)]
pub struct MemoryStore {
    state: Mutex<State>,
    page_size: usize,
}

impl Default for MemoryStore {
    fn default() -> Self {
        Self::new()
    }
}

impl MemoryStore {
    /// Create an empty store returning pages of up to ten parameters.
    pub fn new() -> Self {
        Self::with_page_size(MAX_PAGE_SIZE as usize)
    }

    /// Create an empty store with a smaller (or larger) page limit.
    pub fn with_page_size(page_size: usize) -> Self {
        Self {
            state: Mutex::new(State::default()),
            page_size: page_size.max(1),
        }
    }

    /// Seed plain parameters.
    pub fn with_parameters<I, K, V>(self, parameters: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        for (name, value) in parameters {
            self.insert(name, value, StorageClass::Plain);
        }
        self
    }

    /// Insert or replace a parameter without counting a call.
    pub fn insert(&self, name: impl Into<String>, value: impl Into<String>, storage: StorageClass) {
        let mut state = self.state();
        let name = name.into();
        let version = state.parameters.get(&name).map_or(1, |p| p.version + 1);
        state.parameters.insert(
            name,
            StoredParameter {
                value: value.into(),
                storage,
                version,
            },
        );
    }

    /// Make every matching call fail with `error`.
    ///
    /// With a `name`, only calls that touch that name fail (for listings the
    /// name is compared with the requested path).
    pub fn fail_on(&self, operation: Operation, name: Option<&str>, error: StoreError) {
        self.state().failures.push(InjectedFailure {
            operation,
            name: name.map(str::to_string),
            error,
        });
    }

    pub fn value(&self, name: &str) -> Option<String> {
        self.state().parameters.get(name).map(|p| p.value.clone())
    }

    pub fn storage(&self, name: &str) -> Option<StorageClass> {
        self.state().parameters.get(name).map(|p| p.storage.clone())
    }

    pub fn version(&self, name: &str) -> Option<i64> {
        self.state().parameters.get(name).map(|p| p.version)
    }

    pub fn names(&self) -> Vec<String> {
        self.state().parameters.keys().cloned().collect()
    }

    pub fn len(&self) -> usize {
        self.state().parameters.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn calls(&self) -> CallCounts {
        self.state().calls.clone()
    }

    fn state(&self) -> MutexGuard<'_, State> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn effective_page_size(&self, requested: Option<u8>) -> usize {
        requested
            .map_or(self.page_size, |n| usize::from(n).min(self.page_size))
            .max(1)
    }
}

fn split_page<T>(mut items: Vec<(String, T)>, page_size: usize) -> Page<T> {
    let more = items.len() > page_size;
    items.truncate(page_size);
    let next_token = if more {
        items.last().map(|(name, _)| name.clone())
    } else {
        None
    };
    Page {
        items: items.into_iter().map(|(_, item)| item).collect(),
        next_token,
    }
}

impl ParameterStore for MemoryStore {
    fn get_parameter(&self, name: &str, _decrypt: bool) -> StoreResult<Parameter> {
        let mut state = self.state();
        state.calls.get += 1;
        state.check_failure(Operation::GetParameter, &[name])?;

        state
            .parameters
            .get(name)
            .map(|p| Parameter {
                name: name.to_string(),
                value: p.value.clone(),
                parameter_type: p.storage.parameter_type(),
                version: p.version,
            })
            .ok_or_else(|| StoreError::ParameterNotFound {
                name: name.to_string(),
            })
    }

    fn put_parameter(&self, request: &PutParameter) -> StoreResult<i64> {
        let mut state = self.state();
        state.calls.put += 1;
        state.check_failure(Operation::PutParameter, &[request.name.as_str()])?;

        if request.value.is_empty() {
            return Err(StoreError::InvalidRequest {
                message: format!("value for {} must not be empty", request.name),
            });
        }

        let version = match state.parameters.get(&request.name) {
            Some(_) if !request.overwrite => {
                return Err(StoreError::AlreadyExists {
                    name: request.name.clone(),
                });
            }
            Some(existing) => existing.version + 1,
            None => 1,
        };

        state.parameters.insert(
            request.name.clone(),
            StoredParameter {
                value: request.value.clone(),
                storage: request.storage.clone(),
                version,
            },
        );
        Ok(version)
    }

    fn get_parameters_by_path(&self, query: &PathQuery) -> StoreResult<Page<Parameter>> {
        let mut state = self.state();
        state.calls.path_pages += 1;
        state.check_failure(Operation::GetParametersByPath, &[query.path.as_str()])?;

        if !query.path.starts_with('/') {
            return Err(StoreError::InvalidRequest {
                message: format!("path must start with '/': {}", query.path),
            });
        }

        let prefix = if query.path.ends_with('/') {
            query.path.clone()
        } else {
            format!("{}/", query.path)
        };

        let matching: Vec<(String, Parameter)> = state
            .after(query.next_token.as_deref())
            .filter(|(name, _)| {
                name.strip_prefix(&prefix)
                    .is_some_and(|rest| query.recursive || !rest.contains('/'))
            })
            .map(|(name, p)| {
                (
                    name.clone(),
                    Parameter {
                        name: name.clone(),
                        value: p.value.clone(),
                        parameter_type: p.storage.parameter_type(),
                        version: p.version,
                    },
                )
            })
            .collect();

        Ok(split_page(matching, self.effective_page_size(query.page_size)))
    }

    fn delete_parameters(&self, names: &[String]) -> StoreResult<DeleteOutcome> {
        let mut state = self.state();
        state.calls.delete_batches.push(names.len());
        let refs: Vec<&str> = names.iter().map(String::as_str).collect();
        state.check_failure(Operation::DeleteParameters, &refs)?;

        if names.is_empty() || names.len() > MAX_DELETE_BATCH {
            return Err(StoreError::InvalidRequest {
                message: format!(
                    "delete accepts 1 to {} names, got {}",
                    MAX_DELETE_BATCH,
                    names.len()
                ),
            });
        }

        let mut outcome = DeleteOutcome::default();
        for name in names {
            if state.parameters.remove(name).is_some() {
                outcome.deleted.push(name.clone());
            } else {
                outcome.invalid.push(name.clone());
            }
        }
        Ok(outcome)
    }

    fn describe_parameters(
        &self,
        page_size: Option<u8>,
        next_token: Option<&str>,
    ) -> StoreResult<Page<ParameterMetadata>> {
        let mut state = self.state();
        state.calls.describe_pages += 1;
        state.check_failure(Operation::DescribeParameters, &[])?;

        let all: Vec<(String, ParameterMetadata)> = state
            .after(next_token)
            .map(|(name, p)| {
                let key_id = match &p.storage {
                    StorageClass::Encrypted => Some(DEFAULT_KEY_ALIAS.to_string()),
                    other => other.key_id().map(str::to_string),
                };
                (
                    name.clone(),
                    ParameterMetadata {
                        name: name.clone(),
                        parameter_type: p.storage.parameter_type(),
                        key_id,
                        version: p.version,
                    },
                )
            })
            .collect();

        Ok(split_page(all, self.effective_page_size(page_size)))
    }
}
