// Aggregator endpoints
//
// Read-only dropdown source. The full list is fetched once per form mount
// and filtered client-side, so no pagination parameters are sent.

use crate::client::ApiClient;
use crate::error::Error;
use crate::models::{AggregatorRecord, ListPage};

impl ApiClient {
    /// List all aggregators.
    ///
    /// `GET /aggregator/list`
    pub async fn list_aggregators(&self) -> Result<ListPage<AggregatorRecord>, Error> {
        let url = self.endpoint_url("aggregator/list")?;
        let no_params: [(&str, &str); 0] = [];
        self.get_list(url, &no_params).await
    }
}
