use tabled::Table;

use crate::{
    config,
    discovery::{QueryStrategySelector, Strategy},
    types::QueryTableRow,
};

/// Prints `count` sample queries, cycling through every strategy.
pub async fn queries(count: usize) {
    let cfg = config::discovery_config();
    let selector = QueryStrategySelector::new(cfg.search_limit, cfg.max_offset);
    let mut rng = rand::rng();

    let rows: Vec<QueryTableRow> = Strategy::ALL
        .iter()
        .cycle()
        .take(count)
        .map(|strategy| {
            let query = selector.query_for(*strategy, &mut rng);
            QueryTableRow {
                strategy: query.strategy.to_string(),
                query: query.query,
                limit: query.limit,
                offset: query.offset,
            }
        })
        .collect();

    println!("{}", Table::new(rows));
}
