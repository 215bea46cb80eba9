mod helpers;
mod test_postgres;
mod test_social;
