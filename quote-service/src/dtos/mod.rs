pub mod quotes;

pub use quotes::{
    ExplainQuoteResponse, GenerateQuoteRequest, OptimizedPricingResponse, QuoteResponse,
    UpsellSuggestionResponse,
};
