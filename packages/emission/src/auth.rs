use soroban_sdk::{
    auth::{ContractContext, InvokerContractAuthEntry, SubContractInvocation},
    vec, Address, Env, IntoVal, Symbol,
};

/// Authorizes a `token.transfer(current_contract, to, amount)` that a downstream
/// contract performs inside the next call made by this contract.
pub fn authorize_transfer(env: &Env, token: &Address, to: &Address, amount: i128) {
    env.authorize_as_current_contract(vec![
        env,
        InvokerContractAuthEntry::Contract(SubContractInvocation {
            context: ContractContext {
                contract: token.clone(),
                fn_name: Symbol::new(env, "transfer"),
                args: (env.current_contract_address(), to.clone(), amount).into_val(env),
            },
            sub_invocations: vec![env],
        }),
    ]);
}
