use std::sync::Arc;

use tracing::{info, warn};
use uuid::Uuid;

use crate::config::Settings;
use crate::error::AppError;
use crate::models::{Channel, SettlementOutcome, SettlementPayload, TransactionRequest};
use crate::risk::{AttemptGuard, NoiseSource, ProcessorError, RiskScorer};
use crate::services::{
    HttpPaymentProcessor, IpResolver, PaymentProcessor, RateService, TaxCalculator,
};

/// Drives one settlement attempt end to end: attempt cap, fraud scoring,
/// tax, currency conversion, processor handoff, and attempt-state updates.
/// Owns all mutable session state; construct one per session.
pub struct SettlementOrchestrator {
    guard: AttemptGuard,
    scorer: RiskScorer,
    tax_calculator: TaxCalculator,
    rate_service: Arc<RateService>,
    ip_resolver: IpResolver,
    processor: Arc<dyn PaymentProcessor>,
}

impl SettlementOrchestrator {
    pub fn new(settings: &Settings) -> Result<Self, AppError> {
        Ok(Self {
            guard: AttemptGuard::new(),
            scorer: RiskScorer::new(),
            tax_calculator: TaxCalculator::new(),
            rate_service: Arc::new(RateService::new(&settings.providers)?),
            ip_resolver: IpResolver::new(&settings.providers)?,
            processor: Arc::new(HttpPaymentProcessor::new(&settings.providers)?),
        })
    }

    /// Replace the noise source, pinning scores for tests.
    pub fn with_noise(mut self, noise: Arc<dyn NoiseSource>) -> Self {
        self.scorer = RiskScorer::with_noise(noise);
        self
    }

    /// Replace the processor client.
    pub fn with_processor(mut self, processor: Arc<dyn PaymentProcessor>) -> Self {
        self.processor = processor;
        self
    }

    pub fn rate_service(&self) -> Arc<RateService> {
        Arc::clone(&self.rate_service)
    }

    /// Settle one transaction request. Only request validation is an
    /// error; every engine decision comes back as a `SettlementOutcome`.
    pub async fn settle(&self, request: TransactionRequest) -> Result<SettlementOutcome, AppError> {
        request.validate()?;

        let attempt_id = Uuid::new_v4();
        let channel = request.channel;
        info!(
            attempt = %attempt_id,
            channel = %channel,
            amount_usd = %request.amount_usd,
            "settlement attempt received"
        );

        // 1. Hard attempt cap. Capped channels lock out without scoring.
        if !self.guard.can_attempt(channel).await {
            warn!(attempt = %attempt_id, channel = %channel, "attempt cap reached");
            return Ok(SettlementOutcome::Blocked {
                reason: "too many attempts, try again later".to_string(),
            });
        }

        // 2. Resolve the client IP and warm the rate cache concurrently;
        // both degrade internally and cannot fail the settlement.
        let (client_ip, _) = tokio::join!(self.ip_resolver.resolve(), self.rate_service.prefetch());
        let request = request.resolved(client_ip);

        // The velocity timestamp moves for every scored attempt, even one
        // that ends up blocked.
        let previous_attempt_ms = self.guard.note_attempt(channel, request.timestamp_ms).await;
        let assessment = self.scorer.score(&request, previous_attempt_ms);

        if assessment.blocked {
            warn!(
                attempt = %attempt_id,
                channel = %channel,
                score = assessment.score,
                "fraud check blocked settlement"
            );
            return Ok(SettlementOutcome::Blocked {
                reason: format!("fraud check failed with score {:.1}", assessment.score),
            });
        }

        // 3. Tax, then conversion of the tax-inclusive total.
        let tax = self.tax_calculator.compute(request.amount_usd);
        let conversion = self
            .rate_service
            .convert(request.amount_usd + tax.total_tax, channel.local_currency())
            .await;

        let payload = SettlementPayload {
            request,
            risk_score: assessment.score,
            tax,
            conversion,
        };

        // 4. The processor call is the only step that can legitimately
        // fail; its outcome drives the failure counter.
        match self.processor.submit(&payload).await {
            Ok(payout) => {
                self.guard.record_success(channel).await;
                info!(
                    attempt = %attempt_id,
                    channel = %channel,
                    converted_total = payload.conversion.converted_amount,
                    currency = payload.conversion.target_currency.code(),
                    rate_source = ?payload.conversion.source,
                    "settlement succeeded"
                );
                Ok(SettlementOutcome::Success { payout })
            }
            Err(ProcessorError::Declined { reason }) => {
                self.guard.record_failure(channel).await;
                warn!(attempt = %attempt_id, channel = %channel, reason = %reason, "processor declined");
                Ok(SettlementOutcome::Declined { reason })
            }
            Err(ProcessorError::Unreachable { message }) => {
                self.guard.record_failure(channel).await;
                warn!(attempt = %attempt_id, channel = %channel, error = %message, "processor unreachable");
                Ok(SettlementOutcome::Declined {
                    reason: format!("payment processor unreachable: {}", message),
                })
            }
        }
    }

    /// Current failure count for a channel, for status surfaces and tests.
    pub async fn failure_count(&self, channel: Channel) -> u32 {
        self.guard.failure_count(channel).await
    }
}
