use crate::iteration;
use anyhow::Result;
use splitqp_core::info::{IterationRecord, SolveInfo, SolveStats};
use splitqp_core::math::{RealNumber, Timer};
use splitqp_core::problem::ProblemData;
use splitqp_core::settings::Settings;
use splitqp_core::solution::{Solution, Status};
use splitqp_core::state::{IterationState, WarmStart};
use splitqp_core::traits::KktSolver;
use tracing::{debug, error};

/// Sequential driver for the splitting recurrence. Owns termination
/// (convergence, iteration and time budgets) and the warm-start policy;
/// the linear-system backend is injected by the caller.
pub struct AdmmSolver<T: RealNumber> {
    settings: Settings<T>,
    warm_start: Option<WarmStart<T>>,
}

impl<T> AdmmSolver<T>
where
    T: RealNumber,
{
    pub fn new(settings: Settings<T>) -> Self {
        Self {
            settings,
            warm_start: None,
        }
    }

    pub fn with_warm_start(mut self, warm: WarmStart<T>) -> Self {
        self.warm_start = Some(warm);
        self
    }

    pub fn solve<K: KktSolver<T>>(
        &self,
        problem: &ProblemData<T>,
        kkt: &mut K,
    ) -> Result<Solution<T>> {
        problem.validate()?;
        self.settings.validate()?;
        let n = problem.nvars();
        let m = problem.nconstr();
        let mut state = IterationState::new(n, m);
        match &self.warm_start {
            Some(warm)
                if warm.x.len() == state.dim()
                    && warm.z.len() == state.dim()
                    && warm.u.len() == state.dim() =>
            {
                state.x.copy_from_slice(&warm.x);
                state.z.copy_from_slice(&warm.z);
                state.u.copy_from_slice(&warm.u);
            }
            _ => state.cold_start(),
        }

        let mut info = SolveInfo::default();
        let mut stats = SolveStats::new();
        let timer = Timer::start();
        let mut status = Status::MaxIterations;

        // rho is fixed for the whole solve, so one factorization suffices.
        kkt.factor(problem, self.settings.rho)?;
        stats.factorizations += 1;

        for iter in 0..self.settings.max_iterations {
            state.snapshot_z();
            iteration::compute_rhs(&mut state, problem, &self.settings);
            if let Err(err) = kkt.solve(&mut state.x) {
                error!(iteration = iter, %err, "linear solve failed");
                status = Status::NumericalFailure;
                break;
            }
            stats.linear_solves += 1;
            iteration::update_x(&mut state, &self.settings);
            iteration::project(&mut state, problem, &self.settings);
            iteration::update_dual(&mut state, &self.settings);
            iteration::update_info(&mut info, iter, problem, &state, &self.settings);
            stats.push(IterationRecord::new(
                iter,
                info.objective,
                info.primal_residual,
                info.dual_residual,
                self.settings.rho,
                timer.elapsed(),
            ));
            debug!(
                iteration = iter,
                pri_res = info.primal_residual.to_f64().unwrap_or(f64::NAN),
                dua_res = info.dual_residual.to_f64().unwrap_or(f64::NAN),
                "residual check"
            );

            if iteration::residuals_check(&info, &state, &self.settings) {
                status = Status::Optimal;
                break;
            }
            if let Some(limit) = self.settings.max_time {
                if timer.elapsed() > limit {
                    status = Status::MaxTime;
                    break;
                }
            }
        }

        stats.solve_time = timer.elapsed();
        let rho = self.settings.rho;
        let dual = state.slack(&state.u).iter().map(|&ui| rho * ui).collect();
        Ok(Solution {
            primal: state.primal(&state.z).to_vec(),
            dual,
            status,
            objective_value: info.objective,
            iterations: stats.history.len(),
            info,
            stats,
        })
    }
}
