pub mod apriori;
pub mod eclat;
pub mod fpgrowth;
pub mod fptree;
