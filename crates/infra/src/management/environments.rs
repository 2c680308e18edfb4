//! Environment operations

use apigee_common::validation::require_non_empty;
use apigee_domain::{objectify, ApigeeError, EnvironmentSpec, Property, Result};
use reqwest::Method;
use serde_json::Value;

use super::{to_json, Apigee, Endpoint};

impl Apigee {
    /// # Errors
    /// Propagates dispatcher errors.
    pub async fn list_environments(&self) -> Result<Value> {
        self.call(Method::GET, Endpoint::Environments).await
    }

    /// Environment details with `properties` flattened into an object.
    ///
    /// `{"properties": {"property": [{"name": "useSampling", "value": "true"}]}}`
    /// becomes `{"properties": {"useSampling": true}}`.
    ///
    /// # Errors
    /// `ApigeeError::Decode` if `properties.property` is present but not a
    /// list of name/value pairs, otherwise dispatcher errors.
    pub async fn get_environment(&self, name: &str) -> Result<Value> {
        require_non_empty("environment", "name", name)?;
        let mut environment = self.call(Method::GET, Endpoint::Environment { env: name }).await?;
        objectify_properties(&mut environment)?;
        Ok(environment)
    }

    /// # Errors
    /// Propagates dispatcher errors.
    pub async fn create_environment(&self, spec: &EnvironmentSpec) -> Result<Value> {
        require_non_empty("environment", "name", &spec.name)?;
        let request = self.request(Method::POST, Endpoint::Environments).json(to_json(spec)?);
        self.client.send(request).await
    }

    /// Replace an environment's description and properties.
    ///
    /// # Errors
    /// Propagates dispatcher errors.
    pub async fn update_environment(&self, spec: &EnvironmentSpec) -> Result<Value> {
        require_non_empty("environment", "name", &spec.name)?;
        let request = self
            .request(Method::POST, Endpoint::Environment { env: &spec.name })
            .json(to_json(spec)?);
        self.client.send(request).await
    }
}

fn objectify_properties(environment: &mut Value) -> Result<()> {
    let Some(properties) = environment.get_mut("properties") else {
        return Ok(());
    };
    let Some(list) = properties.get("property") else {
        return Ok(());
    };

    let list: Vec<Property> = serde_json::from_value(list.clone())
        .map_err(|err| ApigeeError::Decode(format!("invalid environment properties: {err}")))?;
    *properties = Value::Object(objectify(&list));
    Ok(())
}
